//! Categorized data-operation errors.
//!
//! Every failure crossing the data-source boundary is a [`DataError`].
//! Errors are categorized for frontend treatment (banner severity, retry
//! hints); none of them is fatal to a view. The two error channels of the
//! collection view (fetch errors and delete errors) both carry this type but
//! are stored and rendered independently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failed data operation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DataError {
    /// Network-level failure reaching the backing store (often transient).
    #[error("network error: {message}")]
    Network {
        /// Transport-level detail
        message: String,
    },

    /// The requested record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind that was looked up
        entity: String,
        /// Identifier that missed
        id: String,
    },

    /// The backing store refused the operation for the current actor.
    #[error("access denied: {operation} on {entity}")]
    Denied {
        /// Entity kind the operation targeted
        entity: String,
        /// Operation that was refused
        operation: String,
    },

    /// The backing store failed internally.
    #[error("backend error: {message}")]
    Backend {
        /// Store-reported detail
        message: String,
    },
}

impl DataError {
    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create an access-denied error.
    pub fn denied(entity: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::Denied {
            entity: entity.into(),
            operation: operation.into(),
        }
    }

    /// Create a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Whether a retry of the same operation may plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Backend { .. })
    }

    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network { .. } => "NETWORK",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Denied { .. } => "DENIED",
            Self::Backend { .. } => "BACKEND",
        }
    }
}
