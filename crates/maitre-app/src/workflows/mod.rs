//! # Workflows Module
//!
//! Portable mutation workflows. Each workflow talks to the backing store
//! through the data source boundary and refreshes cached read state only
//! after the mutation succeeds.

pub mod restaurants;

pub use restaurants::DeleteCoordinator;
