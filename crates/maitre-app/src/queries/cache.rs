//! Collection cache with explicit revalidation.

use crate::model::{RelationSet, RestaurantRecord};
use crate::source::RestaurantDirectory;
use maitre_core::DataError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

// ============================================================================
// Query Keys
// ============================================================================

/// The resource kind a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// The restaurant collection
    Restaurant,
}

impl ResourceKind {
    /// Wire name of the resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured descriptor identifying one cached collection: the resource
/// kind plus the relation set joined into the fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    /// Resource kind fetched
    pub resource: ResourceKind,
    /// Relations joined into the fetch
    pub relations: RelationSet,
}

impl QueryKey {
    /// The fixed key of the restaurant list view.
    pub fn restaurant_list() -> Self {
        Self {
            resource: ResourceKind::Restaurant,
            relations: RelationSet::restaurant_list(),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.resource)?;
        for (i, relation) in self.relations.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{relation}")?;
        }
        write!(f, "]")
    }
}

// ============================================================================
// Query State
// ============================================================================

/// Snapshot of one cached collection.
///
/// `is_loading` is true only while a fetch is in flight and nothing has
/// been loaded yet; revalidations of a loaded key leave it false, so stale
/// rows stay rendered while the refresh runs. Once a key has succeeded,
/// `data` persists across later failed revalidations (stale-but-available);
/// `error` then carries the most recent failure so the view can surface it
/// next to the stale rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState<T> {
    /// Last successfully fetched collection, in server order
    pub data: Option<Vec<T>>,
    /// Most recent fetch failure, cleared by the next success
    pub error: Option<DataError>,
    /// Whether a fetch is in flight with nothing loaded yet (first load)
    pub is_loading: bool,
}

impl<T> QueryState<T> {
    /// State of a key whose first fetch has not completed.
    pub fn loading() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: true,
        }
    }

    /// Records in the snapshot, empty when nothing has been fetched yet.
    pub fn records(&self) -> &[T] {
        self.data.as_deref().unwrap_or(&[])
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::loading()
    }
}

// ============================================================================
// Collection Cache
// ============================================================================

struct Entry {
    state: QueryState<RestaurantRecord>,
    in_flight: u32,
}

impl Entry {
    fn loading() -> Self {
        Self {
            state: QueryState::loading(),
            in_flight: 0,
        }
    }
}

/// Cache of fetched restaurant collections, one entry per [`QueryKey`].
///
/// Entries are written only by fetch completions. Fetches are never
/// cancelled; when several are in flight for one key, each completion
/// overwrites the entry in completion order, so the last-completing fetch
/// determines the final state. The internal lock is held only across state
/// transitions, never across an await.
pub struct CollectionCache {
    directory: Arc<dyn RestaurantDirectory>,
    entries: Mutex<HashMap<QueryKey, Entry>>,
}

impl CollectionCache {
    /// Create an empty cache over the given directory.
    pub fn new(directory: Arc<dyn RestaurantDirectory>) -> Self {
        Self {
            directory,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Synchronous snapshot of the current state for `key`.
    ///
    /// Pure read: never issues a fetch. A key that has never been fetched
    /// reads as loading; callers issue the first fetch via [`Self::ensure`].
    pub fn read(&self, key: &QueryKey) -> QueryState<RestaurantRecord> {
        self.entries
            .lock()
            .get(key)
            .map(|entry| entry.state.clone())
            .unwrap_or_default()
    }

    /// Issue a fetch for `key` unless data is already loaded or a fetch is
    /// in flight.
    ///
    /// This is the first-read path; a key whose previous fetches all failed
    /// is retried on the next `ensure`.
    pub async fn ensure(&self, key: &QueryKey) {
        {
            let mut entries = self.entries.lock();
            let entry = entries.entry(key.clone()).or_insert_with(Entry::loading);
            if entry.state.data.is_some() || entry.in_flight > 0 {
                return;
            }
            entry.in_flight += 1;
            entry.state.is_loading = true;
        }
        debug!(%key, "issuing initial collection fetch");
        let result = self.directory.fetch_collection(&key.relations).await;
        self.apply(key, result);
    }

    /// Re-issue the fetch for `key` unconditionally.
    ///
    /// Does not wait for or cancel any fetch already in flight; the
    /// last-completing fetch wins.
    pub async fn revalidate(&self, key: &QueryKey) {
        {
            let mut entries = self.entries.lock();
            let entry = entries.entry(key.clone()).or_insert_with(Entry::loading);
            entry.in_flight += 1;
            // A loaded key keeps its stale rows rendered while the refresh
            // runs; only a never-loaded key reads as loading.
            entry.state.is_loading = entry.state.data.is_none();
        }
        debug!(%key, "revalidating collection");
        let result = self.directory.fetch_collection(&key.relations).await;
        self.apply(key, result);
    }

    /// Apply a fetch completion to the entry for `key`.
    ///
    /// Success replaces `data` and clears `error`; failure sets `error` and
    /// leaves previously fetched `data` untouched.
    fn apply(&self, key: &QueryKey, result: Result<Vec<RestaurantRecord>, DataError>) {
        let mut entries = self.entries.lock();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::loading);
        entry.in_flight = entry.in_flight.saturating_sub(1);
        match result {
            Ok(records) => {
                debug!(%key, count = records.len(), "collection fetch succeeded");
                entry.state.data = Some(records);
                entry.state.error = None;
            }
            Err(error) => {
                warn!(%key, code = error.code(), "collection fetch failed: {error}");
                entry.state.error = Some(error);
            }
        }
        entry.state.is_loading = entry.in_flight > 0 && entry.state.data.is_none();
    }
}
