use prefs_store::StoreError;
use thiserror::Error;

/// Errors that can occur when reading or writing a backed value.
#[derive(Debug, Error)]
pub enum BackedError {
    /// Failed to serialize/deserialize the value
    #[error("Failed to serialize/deserialize value: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored entry can't be interpreted as the declared type
    #[error("Value stored under '{key}' is {found}, expected {expected}")]
    TypeMismatch {
        /// The key that was read.
        key: String,
        /// The kind of value the accessor expected.
        expected: &'static str,
        /// The kind of value found in the store.
        found: &'static str,
    },

    /// Store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
