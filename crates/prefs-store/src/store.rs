use thiserror::Error;

use crate::NativeValue;

/// An error resulting from operations on a [`PrefsStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A stored entry could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal database error.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),

    /// The database folder could not be prepared.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The standard store was already installed.
    #[error("The standard store is already initialized")]
    AlreadyInitialized,
}

/// A persistent key-value store holding [`NativeValue`]s under string keys.
///
/// Individual calls are expected to be safe to make from multiple threads, but no ordering is
/// provided across calls.
pub trait PrefsStore: Send + Sync {
    /// Retrieves the entry stored under `key`.
    fn get_native(&self, key: &str) -> Result<Option<NativeValue>, StoreError>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set_native(&self, key: &str, value: NativeValue) -> Result<(), StoreError>;

    /// Removes the entry stored under `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Lists the keys currently present, in ascending order.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Retrieves the byte blob stored under `key`.
    ///
    /// Returns `None` when the key is absent or when the entry is not a byte blob.
    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.get_native(key)?.and_then(NativeValue::into_data))
    }

    /// Stores a byte blob under `key`, replacing any previous entry.
    fn set_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.set_native(key, NativeValue::Data(bytes))
    }

    /// Returns true if an entry of any kind exists under `key`.
    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get_native(key)?.is_some())
    }
}
