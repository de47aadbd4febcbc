//! # Maitre Core
//!
//! Shared foundation for the Maitre back-office core:
//!
//! - [`identifiers`]: opaque UUID-backed entity identifiers
//! - [`access`]: the capability-based access-control contract
//! - [`errors`]: the categorized error type shared by all data operations
//!
//! This crate is pure: no async, no I/O, no runtime coupling. Everything
//! here is consumable from any frontend or backend layer.

pub mod access;
pub mod errors;
pub mod identifiers;

pub use access::{AccessOperation, AccessPolicy, AccessScope, GrantSet};
pub use errors::DataError;
pub use identifiers::{OrganizationId, RestaurantId, UserId};
