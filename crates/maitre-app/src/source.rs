//! Data source boundary.
//!
//! The application core never talks to a store directly; it goes through
//! [`RestaurantDirectory`]. Production wires an HTTP or database adapter
//! behind this trait; tests wire the in-memory directory from
//! `maitre-testkit`.

use crate::model::{RelationSet, RestaurantRecord};
use async_trait::async_trait;
use maitre_core::{DataError, RestaurantId};

/// Backing store for the restaurant collection.
///
/// Implementations must preserve server ordering in `fetch_collection`; the
/// view renders records in the order delivered, with no client-side sort or
/// filter. Operations run to completion once issued: the core applies no
/// timeout and no cancellation.
#[async_trait]
pub trait RestaurantDirectory: Send + Sync {
    /// Fetch the restaurant collection with the requested related
    /// projections joined in.
    async fn fetch_collection(
        &self,
        relations: &RelationSet,
    ) -> Result<Vec<RestaurantRecord>, DataError>;

    /// Delete a single restaurant by id.
    async fn delete_by_id(&self, id: RestaurantId) -> Result<(), DataError>;
}
