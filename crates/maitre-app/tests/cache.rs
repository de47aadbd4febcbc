//! Collection cache tests, run as an integration test so the testkit's
//! `RestaurantDirectory` impl and the crate under test share one build of
//! `maitre-app` (cyclic dev-dependencies don't unify types in unit tests).

use maitre_app::{CollectionCache, DataError, QueryKey, RelationSet, ResourceKind};
use maitre_testkit::{records, InMemoryDirectory};
use std::sync::Arc;

fn cache_with(names: &[&str]) -> (Arc<InMemoryDirectory>, CollectionCache) {
    let directory = Arc::new(InMemoryDirectory::with_records(records(names)));
    let cache = CollectionCache::new(directory.clone());
    (directory, cache)
}

#[test]
fn test_unknown_key_reads_as_loading() {
    let (_, cache) = cache_with(&[]);
    let state = cache.read(&QueryKey::restaurant_list());
    assert!(state.is_loading);
    assert!(state.data.is_none());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_ensure_populates_entry() {
    let (directory, cache) = cache_with(&["Cafe", "Diner"]);
    let key = QueryKey::restaurant_list();

    cache.ensure(&key).await;

    let state = cache.read(&key);
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    let names: Vec<_> = state.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Cafe", "Diner"]);
    assert_eq!(directory.fetch_calls(), 1);
}

#[tokio::test]
async fn test_ensure_is_idempotent() {
    let (directory, cache) = cache_with(&["Cafe"]);
    let key = QueryKey::restaurant_list();

    cache.ensure(&key).await;
    cache.ensure(&key).await;
    cache.ensure(&key).await;

    assert_eq!(directory.fetch_calls(), 1);
}

#[tokio::test]
async fn test_ensure_retries_after_failed_first_fetch() {
    let (directory, cache) = cache_with(&["Cafe"]);
    let key = QueryKey::restaurant_list();

    directory.fail_fetch_with(DataError::network("cold start"));
    cache.ensure(&key).await;
    let state = cache.read(&key);
    assert!(state.data.is_none());
    assert!(state.error.is_some());
    assert!(!state.is_loading);

    // No data and nothing in flight: the next ensure re-issues the fetch.
    directory.clear_fetch_failure();
    cache.ensure(&key).await;
    let state = cache.read(&key);
    assert!(state.error.is_none());
    assert_eq!(state.records().len(), 1);
    assert_eq!(directory.fetch_calls(), 2);
}

#[tokio::test]
async fn test_loaded_key_stays_settled_during_revalidate() {
    let directory = Arc::new(InMemoryDirectory::with_records(records(&["Cafe"])));
    let cache = Arc::new(CollectionCache::new(directory.clone()));
    let key = QueryKey::restaurant_list();
    cache.ensure(&key).await;

    directory.hold_fetches();
    let pending = tokio::spawn({
        let cache = cache.clone();
        let key = key.clone();
        async move { cache.revalidate(&key).await }
    });
    while directory.fetch_calls() < 2 {
        tokio::task::yield_now().await;
    }

    // The stale collection keeps reading as settled data while the
    // refresh is in flight.
    let state = cache.read(&key);
    assert!(!state.is_loading);
    assert_eq!(state.records().len(), 1);

    directory.release_fetches();
    pending.await.unwrap();
    assert!(!cache.read(&key).is_loading);
}

#[tokio::test]
async fn test_never_loaded_key_reads_as_loading_during_revalidate() {
    let directory = Arc::new(InMemoryDirectory::with_records(records(&["Cafe"])));
    let cache = Arc::new(CollectionCache::new(directory.clone()));
    let key = QueryKey::restaurant_list();

    directory.hold_fetches();
    let pending = tokio::spawn({
        let cache = cache.clone();
        let key = key.clone();
        async move { cache.revalidate(&key).await }
    });
    while directory.fetch_calls() < 1 {
        tokio::task::yield_now().await;
    }

    assert!(cache.read(&key).is_loading);

    directory.release_fetches();
    pending.await.unwrap();
    assert!(!cache.read(&key).is_loading);
}

#[tokio::test]
async fn test_revalidate_replaces_data() {
    let (directory, cache) = cache_with(&["Cafe"]);
    let key = QueryKey::restaurant_list();
    cache.ensure(&key).await;

    directory.set_records(records(&["Cafe", "Bistro"]));
    cache.revalidate(&key).await;

    let state = cache.read(&key);
    let names: Vec<_> = state.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Cafe", "Bistro"]);
    assert_eq!(directory.fetch_calls(), 2);
}

#[tokio::test]
async fn test_revalidate_failure_keeps_stale_data_and_surfaces_error() {
    let (directory, cache) = cache_with(&["Cafe"]);
    let key = QueryKey::restaurant_list();
    cache.ensure(&key).await;

    directory.fail_fetch_with(DataError::network("gateway unreachable"));
    cache.revalidate(&key).await;

    let state = cache.read(&key);
    assert!(!state.is_loading);
    // Stale data stays rendered, error rides alongside it.
    assert_eq!(state.records().len(), 1);
    assert_eq!(state.error, Some(DataError::network("gateway unreachable")));
}

#[tokio::test]
async fn test_success_after_failure_clears_error() {
    let (directory, cache) = cache_with(&["Cafe"]);
    let key = QueryKey::restaurant_list();

    directory.fail_fetch_with(DataError::backend("migration in progress"));
    cache.ensure(&key).await;
    let state = cache.read(&key);
    assert!(state.data.is_none());
    assert!(state.error.is_some());

    directory.clear_fetch_failure();
    cache.revalidate(&key).await;
    let state = cache.read(&key);
    assert!(state.error.is_none());
    assert_eq!(state.records().len(), 1);
}

#[tokio::test]
async fn test_revalidate_is_idempotent_without_mutation() {
    let (_, cache) = cache_with(&["Cafe", "Diner"]);
    let key = QueryKey::restaurant_list();

    cache.revalidate(&key).await;
    let first = cache.read(&key);
    cache.revalidate(&key).await;
    let second = cache.read(&key);

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_revalidates_settle() {
    let (_, cache) = cache_with(&["Cafe"]);
    let key = QueryKey::restaurant_list();

    futures::join!(cache.revalidate(&key), cache.revalidate(&key));

    let state = cache.read(&key);
    assert!(!state.is_loading);
    assert_eq!(state.records().len(), 1);
}

#[tokio::test]
async fn test_keys_are_independent() {
    let (_, cache) = cache_with(&["Cafe"]);
    let list_key = QueryKey::restaurant_list();
    let bare_key = QueryKey {
        resource: ResourceKind::Restaurant,
        relations: RelationSet::none(),
    };

    cache.ensure(&list_key).await;

    assert!(!cache.read(&list_key).is_loading);
    assert!(cache.read(&bare_key).is_loading);
}

#[test]
fn test_query_key_display() {
    let key = QueryKey::restaurant_list();
    assert_eq!(
        key.to_string(),
        "restaurant[user,organization,customer_preference.count,reservation.count,table_availability.count]"
    );
}
