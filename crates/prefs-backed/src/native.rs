//! Accessor for values stored in the store's native representation.

use std::sync::Arc;

use prefs_store::PrefsStore;
use tracing::{debug, warn};

use crate::{BackedError, Key, NativeType};

/// A value of type `T` stored natively under a key, with a default for when nothing is stored.
///
/// Reads never come back empty: a missing entry, or one that can't be interpreted as `T`, yields
/// the default. For `Option<U>` values, writing `None` removes the entry; see
/// [`NativeBacked::optional`].
///
/// # Example
/// ```rust
/// use std::sync::Arc;
///
/// use prefs_backed::NativeBacked;
/// use prefs_store::MemoryPrefsStore;
///
/// let auto_save = NativeBacked::new("auto_save", true, Arc::new(MemoryPrefsStore::new()));
/// assert!(auto_save.get());
///
/// auto_save.set(false);
/// assert!(!auto_save.get());
/// ```
#[derive(Clone)]
pub struct NativeBacked<T> {
    key: String,
    default_value: T,
    store: Arc<dyn PrefsStore>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for NativeBacked<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeBacked")
            .field("key", &self.key)
            .field("default_value", &self.default_value)
            .finish()
    }
}

impl<T: NativeType> NativeBacked<T> {
    /// Create an accessor for `key` in `store`, reading as `default_value` when nothing usable
    /// is stored.
    pub fn new(key: impl Into<String>, default_value: T, store: Arc<dyn PrefsStore>) -> Self {
        Self {
            key: key.into(),
            default_value,
            store,
        }
    }

    /// Create an accessor for a typed [`Key`] in `store`.
    pub fn for_key(key: Key<T>, default_value: T, store: Arc<dyn PrefsStore>) -> Self {
        Self::new(key.name(), default_value, store)
    }

    /// Create an accessor for `key` in the process-wide [standard](prefs_store::standard) store.
    pub fn standard(key: impl Into<String>, default_value: T) -> Self {
        Self::new(key, default_value, prefs_store::standard())
    }

    /// The key this accessor reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value [`get`](Self::get) returns when nothing usable is stored.
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    /// Read the stored value without applying the default.
    ///
    /// Returns `Ok(None)` when nothing is stored under the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry can't be interpreted as `T` or if the store fails.
    pub fn try_get(&self) -> Result<Option<T>, BackedError> {
        let Some(value) = self.store.get_native(&self.key)? else {
            return Ok(None);
        };

        let found = value.kind();
        match T::from_native(value) {
            Some(value) => Ok(Some(value)),
            None => Err(BackedError::TypeMismatch {
                key: self.key.clone(),
                expected: T::TYPE_NAME,
                found,
            }),
        }
    }

    /// Read the stored value, or the default when it is missing or unusable.
    ///
    /// Errors other than a missing entry are logged but do not propagate.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        match self.try_get() {
            Ok(Some(value)) => value,
            Ok(None) => self.default_value.clone(),
            Err(e) => {
                warn!("Failed to read backed value '{}': {:?}", self.key, e);
                self.default_value.clone()
            }
        }
    }

    /// Store `value` natively, or remove the entry when `value` is a "no value" instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn try_set(&self, value: T) -> Result<(), BackedError> {
        match value.into_native() {
            Some(native) => self.store.set_native(&self.key, native)?,
            None => {
                debug!("Removing backed value '{}'", self.key);
                self.store.remove(&self.key)?;
            }
        }
        Ok(())
    }

    /// Store `value`. Errors are logged but do not propagate.
    pub fn set(&self, value: T) {
        if let Err(e) = self.try_set(value) {
            warn!("Failed to write backed value '{}': {:?}", self.key, e);
        }
    }

    /// Remove the entry, so reads return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn try_remove(&self) -> Result<(), BackedError> {
        self.store.remove(&self.key)?;
        Ok(())
    }

    /// Remove the entry. Errors are logged but do not propagate.
    pub fn remove(&self) {
        if let Err(e) = self.try_remove() {
            warn!("Failed to remove backed value '{}': {:?}", self.key, e);
        }
    }
}

impl<T: NativeType> NativeBacked<Option<T>> {
    /// Create an accessor for an optional value whose default is `None`.
    pub fn optional(key: impl Into<String>, store: Arc<dyn PrefsStore>) -> Self {
        Self::new(key, None, store)
    }

    /// Create an accessor for an optional value in the process-wide
    /// [standard](prefs_store::standard) store.
    pub fn optional_standard(key: impl Into<String>) -> Self {
        Self::new(key, None, prefs_store::standard())
    }
}
