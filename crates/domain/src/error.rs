//! Domain error types.

use common::RecordId;
use table_store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: RecordId },

    /// The operation would violate referential integrity or an open/closed
    /// invariant.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Malformed or contradictory input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The image persistence collaborator failed.
    #[error("image storage failed: {0}")]
    ImageStorage(String),

    /// An error occurred in the table store.
    #[error("table store error: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Builds a `NotFound` error for the given table and key.
    pub fn not_found(entity: &'static str, id: RecordId) -> Self {
        Self::NotFound { entity, id }
    }

    /// True when this error (possibly store-level) means "no such record".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Store(StoreError::NotFound { .. })
        )
    }
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
