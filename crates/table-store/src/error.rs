use common::RecordId;
use thiserror::Error;

/// Errors that can occur when interacting with the table store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record does not exist in the named table.
    #[error("record not found: {table}[{key}]")]
    NotFound { table: String, key: RecordId },

    /// The underlying store call failed.
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// A record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Builds a `NotFound` error for the given table and key.
    pub fn not_found(table: &str, key: RecordId) -> Self {
        Self::NotFound {
            table: table.to_string(),
            key,
        }
    }
}

/// Result type for table store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
