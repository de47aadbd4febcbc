//! # Query Module
//!
//! The read side of the application core: a collection cache keyed by a
//! structured query descriptor, with synchronous snapshot reads and explicit
//! asynchronous `ensure`/`revalidate` operations.
//!
//! The cache replaces ambient refetch-on-mount behavior with an explicit
//! store: views read the current snapshot without side effects, and the
//! owning [`crate::core::AppCore`] decides when fetches are issued.

mod cache;

pub use cache::{CollectionCache, QueryKey, QueryState, ResourceKind};
