//! Restaurant mutation workflows.

use crate::queries::{CollectionCache, QueryKey};
use crate::source::RestaurantDirectory;
use maitre_core::{DataError, RestaurantId};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

/// Executes delete-by-id operations and keeps the cached collection honest.
///
/// The coordinator owns a single-slot `last_error`, independent of fetch
/// errors: cleared at the start of every attempt, set on failure, left empty
/// on success. A failed delete never touches the cached collection, and
/// revalidation is issued only after the delete itself succeeded, so a row
/// disappears only once the refreshed collection no longer contains it.
///
/// Two deletes fired in quick succession are not serialized against each
/// other; their revalidations interleave and the last-completing one
/// determines the final cache state.
pub struct DeleteCoordinator {
    directory: Arc<dyn RestaurantDirectory>,
    cache: Arc<CollectionCache>,
    key: QueryKey,
    last_error: Mutex<Option<DataError>>,
}

impl DeleteCoordinator {
    /// Create a coordinator that revalidates `key` on `cache` after each
    /// successful delete.
    pub fn new(
        directory: Arc<dyn RestaurantDirectory>,
        cache: Arc<CollectionCache>,
        key: QueryKey,
    ) -> Self {
        Self {
            directory,
            cache,
            key,
            last_error: Mutex::new(None),
        }
    }

    /// Delete one restaurant, then revalidate the cached collection.
    ///
    /// No retry, no timeout, no optimistic removal. The outcome is returned
    /// to the caller and also recorded in [`Self::last_error`] for the next
    /// render.
    pub async fn delete(&self, id: RestaurantId) -> Result<(), DataError> {
        *self.last_error.lock() = None;

        match self.directory.delete_by_id(id).await {
            Ok(()) => {
                debug!(%id, "restaurant deleted, revalidating collection");
                self.cache.revalidate(&self.key).await;
                Ok(())
            }
            Err(error) => {
                warn!(%id, code = error.code(), "restaurant delete failed: {error}");
                *self.last_error.lock() = Some(error.clone());
                Err(error)
            }
        }
    }

    /// The most recent delete failure, if the latest attempt failed.
    pub fn last_error(&self) -> Option<DataError> {
        self.last_error.lock().clone()
    }
}
