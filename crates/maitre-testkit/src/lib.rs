//! # Maitre Testkit
//!
//! In-memory collaborators for exercising the application core without a
//! backend: an insertion-ordered [`InMemoryDirectory`] with failure
//! injection and call counters, and policy doubles ([`AllowAll`],
//! [`CountingPolicy`]) for authorization tests.

use async_trait::async_trait;
use maitre_app::authorization::entity;
use maitre_app::model::{
    OrganizationRef, Relation, RelationSet, RelatedCounts, RestaurantRecord, UserRef,
};
use maitre_app::source::RestaurantDirectory;
use maitre_core::{
    AccessOperation, AccessPolicy, AccessScope, DataError, GrantSet, OrganizationId, RestaurantId,
    UserId,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

// ============================================================================
// Record Builders
// ============================================================================

/// Build a fully populated record with the given name.
pub fn record(name: &str) -> RestaurantRecord {
    RestaurantRecord {
        id: RestaurantId::generate(),
        name: name.to_string(),
        user: Some(UserRef {
            id: UserId::generate(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        }),
        organization: Some(OrganizationRef {
            id: OrganizationId::generate(),
            name: format!("{name} Group"),
        }),
        counts: RelatedCounts {
            customer_preferences: 2,
            reservations: 4,
            table_availability: 8,
        },
    }
}

/// Build one record per name, in order.
pub fn records(names: &[&str]) -> Vec<RestaurantRecord> {
    names.iter().map(|name| record(name)).collect()
}

/// A grant set covering everything the restaurant list view checks, at
/// project scope.
pub fn full_grants() -> GrantSet {
    GrantSet::new()
        .with_all(entity::RESTAURANT, AccessScope::Project)
        .with(entity::USER, AccessOperation::Read, AccessScope::Project)
        .with(
            entity::ORGANIZATION,
            AccessOperation::Read,
            AccessScope::Project,
        )
        .with(
            entity::CUSTOMER_PREFERENCE,
            AccessOperation::Read,
            AccessScope::Project,
        )
        .with(
            entity::RESERVATION,
            AccessOperation::Read,
            AccessScope::Project,
        )
        .with(
            entity::TABLE_AVAILABILITY,
            AccessOperation::Read,
            AccessScope::Project,
        )
}

// ============================================================================
// Policy Doubles
// ============================================================================

/// Grants every request. For tests that are not about authorization.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn can_access(&self, _entity: &str, _operation: AccessOperation, _scope: AccessScope) -> bool {
        true
    }
}

/// Wraps a policy and counts how often it is consulted.
///
/// Used to verify that the view evaluates the policy into a capability
/// vector once per render pass rather than querying per row.
#[derive(Debug)]
pub struct CountingPolicy<P> {
    inner: P,
    calls: AtomicUsize,
}

impl<P: AccessPolicy> CountingPolicy<P> {
    /// Wrap `inner`.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `can_access` calls observed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<P: AccessPolicy> AccessPolicy for CountingPolicy<P> {
    fn can_access(&self, entity: &str, operation: AccessOperation, scope: AccessScope) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.can_access(entity, operation, scope)
    }
}

// ============================================================================
// In-Memory Directory
// ============================================================================

/// Insertion-ordered in-memory implementation of the data source boundary.
///
/// Fetches project the stored records through the requested relation set,
/// the way a real backend would: an unrequested reference comes back as
/// `None` and an unrequested count projection as zero. Failure injection is
/// sticky until cleared.
#[derive(Default)]
pub struct InMemoryDirectory {
    records: Mutex<Vec<RestaurantRecord>>,
    fetch_failure: Mutex<Option<DataError>>,
    delete_failure: Mutex<Option<DataError>>,
    fetch_gate: Mutex<Option<Arc<Notify>>>,
    fetch_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemoryDirectory {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory seeded with records, preserved in the given order.
    pub fn with_records(records: Vec<RestaurantRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Replace the stored records.
    pub fn set_records(&self, records: Vec<RestaurantRecord>) {
        *self.records.lock() = records;
    }

    /// Current record count.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Make every subsequent fetch fail with `error` until cleared.
    pub fn fail_fetch_with(&self, error: DataError) {
        *self.fetch_failure.lock() = Some(error);
    }

    /// Stop failing fetches.
    pub fn clear_fetch_failure(&self) {
        *self.fetch_failure.lock() = None;
    }

    /// Make every subsequent delete fail with `error` until cleared.
    pub fn fail_delete_with(&self, error: DataError) {
        *self.delete_failure.lock() = Some(error);
    }

    /// Stop failing deletes.
    pub fn clear_delete_failure(&self) {
        *self.delete_failure.lock() = None;
    }

    /// Park subsequent fetches until [`Self::release_fetches`] is called.
    ///
    /// The fetch counter still increments when a fetch is issued, so tests
    /// can wait for a parked fetch to be in flight before observing state.
    pub fn hold_fetches(&self) {
        *self.fetch_gate.lock() = Some(Arc::new(Notify::new()));
    }

    /// Release parked fetches and stop holding new ones.
    pub fn release_fetches(&self) {
        if let Some(gate) = self.fetch_gate.lock().take() {
            gate.notify_waiters();
        }
    }

    /// Number of `fetch_collection` calls observed.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of `delete_by_id` calls observed.
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn project(record: &RestaurantRecord, relations: &RelationSet) -> RestaurantRecord {
        RestaurantRecord {
            id: record.id,
            name: record.name.clone(),
            user: relations
                .contains(Relation::User)
                .then(|| record.user.clone())
                .flatten(),
            organization: relations
                .contains(Relation::Organization)
                .then(|| record.organization.clone())
                .flatten(),
            counts: RelatedCounts {
                customer_preferences: relations
                    .contains(Relation::CustomerPreferenceCount)
                    .then_some(record.counts.customer_preferences)
                    .unwrap_or(0),
                reservations: relations
                    .contains(Relation::ReservationCount)
                    .then_some(record.counts.reservations)
                    .unwrap_or(0),
                table_availability: relations
                    .contains(Relation::TableAvailabilityCount)
                    .then_some(record.counts.table_availability)
                    .unwrap_or(0),
            },
        }
    }
}

#[async_trait]
impl RestaurantDirectory for InMemoryDirectory {
    async fn fetch_collection(
        &self,
        relations: &RelationSet,
    ) -> Result<Vec<RestaurantRecord>, DataError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.fetch_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(error) = self.fetch_failure.lock().clone() {
            return Err(error);
        }
        let records = self.records.lock();
        Ok(records
            .iter()
            .map(|record| Self::project(record, relations))
            .collect())
    }

    async fn delete_by_id(&self, id: RestaurantId) -> Result<(), DataError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.delete_failure.lock().clone() {
            return Err(error);
        }
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Err(DataError::not_found(entity::RESTAURANT, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_preserves_insertion_order() {
        let directory = InMemoryDirectory::with_records(records(&["C", "A", "B"]));
        let fetched = directory
            .fetch_collection(&RelationSet::restaurant_list())
            .await
            .unwrap();
        let names: Vec<_> = fetched.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_fetch_projects_requested_relations_only() {
        let directory = InMemoryDirectory::with_records(records(&["Cafe"]));
        let fetched = directory
            .fetch_collection(&RelationSet::from_iter([Relation::Organization]))
            .await
            .unwrap();
        let record = &fetched[0];
        assert!(record.user.is_none());
        assert!(record.organization.is_some());
        assert_eq!(record.counts, RelatedCounts::default());
    }

    #[tokio::test]
    async fn test_sticky_failure_injection() {
        let directory = InMemoryDirectory::new();
        directory.fail_fetch_with(DataError::network("down"));
        assert!(directory
            .fetch_collection(&RelationSet::none())
            .await
            .is_err());
        assert!(directory
            .fetch_collection(&RelationSet::none())
            .await
            .is_err());
        directory.clear_fetch_failure();
        assert!(directory
            .fetch_collection(&RelationSet::none())
            .await
            .is_ok());
        assert_eq!(directory.fetch_calls(), 3);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let directory = InMemoryDirectory::with_records(records(&["Cafe", "Diner"]));
        let id = directory.records.lock()[0].id;
        directory.delete_by_id(id).await.unwrap();
        assert_eq!(directory.len(), 1);
        assert!(matches!(
            directory.delete_by_id(id).await,
            Err(DataError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_gate_parks_and_releases() {
        let directory = Arc::new(InMemoryDirectory::with_records(records(&["Cafe"])));
        directory.hold_fetches();

        let pending = tokio::spawn({
            let directory = directory.clone();
            async move {
                directory
                    .fetch_collection(&RelationSet::restaurant_list())
                    .await
            }
        });
        while directory.fetch_calls() < 1 {
            tokio::task::yield_now().await;
        }
        assert!(!pending.is_finished());

        directory.release_fetches();
        let fetched = pending.await.unwrap().unwrap();
        assert_eq!(fetched.len(), 1);
    }

    #[test]
    fn test_counting_policy() {
        let policy = CountingPolicy::new(AllowAll);
        assert!(policy.can_access("restaurant", AccessOperation::Read, AccessScope::Project));
        assert!(policy.can_access("user", AccessOperation::Read, AccessScope::Project));
        assert_eq!(policy.calls(), 2);
    }
}
