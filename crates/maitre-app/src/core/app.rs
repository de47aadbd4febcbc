//! Application core wiring.

use crate::authorization::ListCapabilities;
use crate::queries::{CollectionCache, QueryKey};
use crate::source::RestaurantDirectory;
use crate::views::RestaurantListView;
use crate::workflows::DeleteCoordinator;
use maitre_core::{AccessPolicy, AccessScope, DataError, RestaurantId};
use std::sync::Arc;

/// The headless application core of the restaurant back-office.
///
/// Holds the three collaborating components and exposes the surface a
/// frontend needs:
///
/// - [`Self::load_restaurants`] issues the first fetch for the list key.
/// - [`Self::restaurants_view`] composes the current view state; callable
///   at any time, cheap, side-effect free.
/// - [`Self::delete_restaurant`] runs the delete workflow; on success the
///   collection is revalidated before the call returns.
/// - [`Self::refresh_restaurants`] revalidates on demand.
///
/// The core is `Send + Sync`; frontends share it behind an `Arc` and call
/// into it from their event loop. Operations never block composition: a
/// render can happen while a fetch or delete is pending and will show the
/// loading indicator or the previous snapshot accordingly.
pub struct AppCore {
    policy: Arc<dyn AccessPolicy>,
    scope: AccessScope,
    cache: Arc<CollectionCache>,
    delete: DeleteCoordinator,
    list_key: QueryKey,
}

impl AppCore {
    /// Wire a core over the given policy and data source, scoped to
    /// project-level access.
    pub fn new(policy: Arc<dyn AccessPolicy>, directory: Arc<dyn RestaurantDirectory>) -> Self {
        Self::with_scope(policy, directory, AccessScope::Project)
    }

    /// Wire a core with an explicit access scope.
    pub fn with_scope(
        policy: Arc<dyn AccessPolicy>,
        directory: Arc<dyn RestaurantDirectory>,
        scope: AccessScope,
    ) -> Self {
        let list_key = QueryKey::restaurant_list();
        let cache = Arc::new(CollectionCache::new(directory.clone()));
        let delete = DeleteCoordinator::new(directory, cache.clone(), list_key.clone());
        Self {
            policy,
            scope,
            cache,
            delete,
            list_key,
        }
    }

    /// The query key of the restaurant list view.
    pub fn restaurant_list_key(&self) -> &QueryKey {
        &self.list_key
    }

    /// Issue the initial collection fetch if none has been issued yet.
    pub async fn load_restaurants(&self) {
        self.cache.ensure(&self.list_key).await;
    }

    /// Re-fetch the collection unconditionally.
    pub async fn refresh_restaurants(&self) {
        self.cache.revalidate(&self.list_key).await;
    }

    /// Delete one restaurant and, on success, revalidate the collection.
    pub async fn delete_restaurant(&self, id: RestaurantId) -> Result<(), DataError> {
        self.delete.delete(id).await
    }

    /// Compose the restaurant list view from current state.
    ///
    /// The access policy is evaluated fresh on every call (never cached
    /// across renders), then the cache snapshot and the delete error slot
    /// are folded in by the pure composer.
    pub fn restaurants_view(&self) -> RestaurantListView {
        let caps = ListCapabilities::evaluate(self.policy.as_ref(), self.scope);
        let snapshot = self.cache.read(&self.list_key);
        RestaurantListView::compose(&caps, &snapshot, self.delete.last_error())
    }
}
