//! # Maitre App
//!
//! Portable headless application core for the Maitre restaurant back-office.
//!
//! The crate coordinates three concerns behind one render entry point:
//!
//! - **Authorization**: an [`maitre_core::AccessPolicy`] is evaluated once
//!   per render into a [`authorization::ListCapabilities`] vector that gates
//!   every column and row action.
//! - **Collection state**: [`queries::CollectionCache`] holds the last
//!   fetched restaurant collection per query key and exposes explicit
//!   `ensure`/`revalidate` operations.
//! - **Mutations**: [`workflows::DeleteCoordinator`] deletes a record and
//!   revalidates the cache only after the delete succeeds, keeping its own
//!   error slot separate from fetch errors.
//!
//! [`core::AppCore`] wires the three together; [`views::RestaurantListView`]
//! is the pure composition of their states that frontends render.
//!
//! No side effects live in view composition, and no frontend concern
//! (styling, routing implementation, HTTP) lives anywhere in this crate.

pub mod authorization;
pub mod core;
pub mod model;
pub mod queries;
pub mod routes;
pub mod source;
pub mod views;
pub mod workflows;

pub use crate::core::AppCore;
pub use authorization::ListCapabilities;
pub use model::{
    OrganizationRef, Relation, RelationSet, RelatedCollection, RelatedCounts, RestaurantRecord,
    UserRef,
};
pub use queries::{CollectionCache, QueryKey, QueryState, ResourceKind};
pub use routes::Route;
pub use source::RestaurantDirectory;
pub use views::{Cell, Column, ListContent, RestaurantListView, Row};
pub use workflows::DeleteCoordinator;

// Re-export the shared foundation so frontends need a single import root.
pub use maitre_core::{
    AccessOperation, AccessPolicy, AccessScope, DataError, GrantSet, OrganizationId, RestaurantId,
    UserId,
};
