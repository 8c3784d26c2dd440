//! Cart error types.

use cart_storage::StorageError;
use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// None of these reach the render path: `CartStore` logs and recovers, and
/// only the `try_*` methods hand them back to the caller.
#[derive(Error, Debug)]
pub enum CartError {
    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u64, u32),

    /// A required product attribute was missing at the DOM boundary.
    #[error("Missing product attribute: {0}")]
    MissingAttribute(String),

    /// Persistence error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Serialization(e.to_string())
    }
}
