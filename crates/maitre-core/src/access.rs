//! Capability-based access control contract.
//!
//! The core never computes permissions itself; it asks an [`AccessPolicy`]
//! whether the current actor may perform an operation on an entity kind
//! within a scope. Policies are strict-by-default: anything not explicitly
//! granted reads as denied, and a policy that cannot decide must answer
//! `false` rather than fail.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// ============================================================================
// Operations and Scopes
// ============================================================================

/// The operation an actor wants to perform on an entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessOperation {
    /// Create a new record
    Create,
    /// Read records (including aggregate count projections)
    Read,
    /// Update an existing record
    Update,
    /// Delete a record
    Delete,
}

impl AccessOperation {
    /// All operations, in declaration order.
    pub const ALL: [AccessOperation; 4] = [
        AccessOperation::Create,
        AccessOperation::Read,
        AccessOperation::Update,
        AccessOperation::Delete,
    ];

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for AccessOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The scope a decision applies within.
///
/// Project scope covers tenant-level data (everything the back-office view
/// touches); platform scope covers operator-level administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessScope {
    /// Tenant/project-level data access
    #[default]
    Project,
    /// Platform operator access
    Platform,
}

impl AccessScope {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Platform => "platform",
        }
    }
}

impl fmt::Display for AccessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Policy Contract
// ============================================================================

/// Answers "may the current actor perform `operation` on `entity` within
/// `scope`?".
///
/// Contract:
/// - Pure query: no mutation observable by the caller, no fetches triggered.
/// - Synchronous and infallible: a policy that cannot determine access
///   returns `false` (closed by default), never panics.
/// - Callable at arbitrary points during view composition; callers that
///   need several decisions per render should evaluate them once into a
///   capability vector rather than re-querying per row.
pub trait AccessPolicy: Send + Sync {
    /// Decide whether `operation` on `entity` is permitted within `scope`.
    fn can_access(&self, entity: &str, operation: AccessOperation, scope: AccessScope) -> bool;
}

impl<P: AccessPolicy + ?Sized> AccessPolicy for &P {
    fn can_access(&self, entity: &str, operation: AccessOperation, scope: AccessScope) -> bool {
        (**self).can_access(entity, operation, scope)
    }
}

impl<P: AccessPolicy + ?Sized> AccessPolicy for std::sync::Arc<P> {
    fn can_access(&self, entity: &str, operation: AccessOperation, scope: AccessScope) -> bool {
        (**self).can_access(entity, operation, scope)
    }
}

// ============================================================================
// GrantSet Policy
// ============================================================================

/// A concrete deny-unless-granted policy: an explicit set of granted
/// (entity, operation, scope) triples.
///
/// In production the set is derived from the actor's session; in tests it is
/// constructed directly.
#[derive(Debug, Clone, Default)]
pub struct GrantSet {
    granted: HashSet<(String, AccessOperation, AccessScope)>,
}

impl GrantSet {
    /// Create an empty grant set (denies everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grant.
    pub fn grant(
        &mut self,
        entity: impl Into<String>,
        operation: AccessOperation,
        scope: AccessScope,
    ) -> &mut Self {
        self.granted.insert((entity.into(), operation, scope));
        self
    }

    /// Builder-style grant.
    pub fn with(
        mut self,
        entity: impl Into<String>,
        operation: AccessOperation,
        scope: AccessScope,
    ) -> Self {
        self.grant(entity, operation, scope);
        self
    }

    /// Grant every operation on an entity within a scope.
    pub fn with_all(mut self, entity: impl Into<String>, scope: AccessScope) -> Self {
        let entity = entity.into();
        for op in AccessOperation::ALL {
            self.grant(entity.clone(), op, scope);
        }
        self
    }

    /// Revoke a grant. Returns `true` if it was present.
    pub fn revoke(
        &mut self,
        entity: &str,
        operation: AccessOperation,
        scope: AccessScope,
    ) -> bool {
        self.granted
            .remove(&(entity.to_string(), operation, scope))
    }

    /// Number of grants held.
    pub fn len(&self) -> usize {
        self.granted.len()
    }

    /// Whether no grants are held.
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}

impl AccessPolicy for GrantSet {
    fn can_access(&self, entity: &str, operation: AccessOperation, scope: AccessScope) -> bool {
        self.granted
            .contains(&(entity.to_string(), operation, scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grant_set_denies_everything() {
        let grants = GrantSet::new();
        for op in AccessOperation::ALL {
            assert!(!grants.can_access("restaurant", op, AccessScope::Project));
        }
    }

    #[test]
    fn test_grant_is_exact_triple() {
        let grants =
            GrantSet::new().with("restaurant", AccessOperation::Read, AccessScope::Project);

        assert!(grants.can_access("restaurant", AccessOperation::Read, AccessScope::Project));
        // Different operation, entity, or scope: denied
        assert!(!grants.can_access("restaurant", AccessOperation::Delete, AccessScope::Project));
        assert!(!grants.can_access("user", AccessOperation::Read, AccessScope::Project));
        assert!(!grants.can_access("restaurant", AccessOperation::Read, AccessScope::Platform));
    }

    #[test]
    fn test_with_all_grants_every_operation() {
        let grants = GrantSet::new().with_all("restaurant", AccessScope::Project);
        for op in AccessOperation::ALL {
            assert!(grants.can_access("restaurant", op, AccessScope::Project));
        }
        assert_eq!(grants.len(), 4);
    }

    #[test]
    fn test_revoke() {
        let mut grants =
            GrantSet::new().with("user", AccessOperation::Read, AccessScope::Project);
        assert!(grants.revoke("user", AccessOperation::Read, AccessScope::Project));
        assert!(!grants.can_access("user", AccessOperation::Read, AccessScope::Project));
        assert!(!grants.revoke("user", AccessOperation::Read, AccessScope::Project));
    }

    #[test]
    fn test_policy_through_arc() {
        use std::sync::Arc;
        let grants: Arc<dyn AccessPolicy> = Arc::new(
            GrantSet::new().with("restaurant", AccessOperation::Read, AccessScope::Project),
        );
        assert!(grants.can_access("restaurant", AccessOperation::Read, AccessScope::Project));
    }

    #[test]
    fn test_labels() {
        assert_eq!(AccessOperation::Create.label(), "create");
        assert_eq!(AccessScope::Project.to_string(), "project");
        assert_eq!(AccessOperation::Delete.to_string(), "delete");
    }
}
