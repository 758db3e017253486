//! Store error types.

use thiserror::Error;

/// Errors that can occur when using the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters the backend cannot address.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// Writing the value would exceed the backend's capacity.
    #[error("Quota exceeded writing {key}: {required} bytes needed, {limit} allowed")]
    QuotaExceeded {
        key: String,
        required: usize,
        limit: usize,
    },

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}
