//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using a key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing store cannot be reached (e.g. storage disabled).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A write would exceed the store's capacity.
    #[error("Storage quota exceeded writing {key} ({bytes} bytes)")]
    QuotaExceeded { key: String, bytes: usize },

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    Store(String),
}

impl StorageError {
    /// Whether the error came from (de)serializing a value rather than the store.
    pub fn is_serialization(&self) -> bool {
        matches!(self, StorageError::Serialize(_))
    }
}
