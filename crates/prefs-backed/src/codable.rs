//! Accessor for structured values stored as JSON bytes.

use std::sync::Arc;

use prefs_store::{NativeValue, PrefsStore};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{BackedError, Key};

/// A value of type `T` persisted as JSON bytes under a key.
///
/// Use this for values the store can't hold natively. Every read decodes the current entry and
/// every write commits immediately.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
///
/// use prefs_backed::CodableBacked;
/// use prefs_store::MemoryPrefsStore;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Account {
///     email: String,
/// }
///
/// let account = CodableBacked::<Account>::new("account", None, Arc::new(MemoryPrefsStore::new()));
/// account.set(Some(&Account { email: "a@example.com".to_string() }));
/// assert_eq!(account.get().map(|a| a.email), Some("a@example.com".to_string()));
/// ```
#[derive(Clone)]
pub struct CodableBacked<T> {
    key: String,
    default_value: Option<T>,
    store: Arc<dyn PrefsStore>,
}

impl<T> std::fmt::Debug for CodableBacked<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodableBacked")
            .field("key", &self.key)
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> CodableBacked<T> {
    /// Create an accessor for `key` in `store`.
    pub fn new(
        key: impl Into<String>,
        default_value: Option<T>,
        store: Arc<dyn PrefsStore>,
    ) -> Self {
        Self {
            key: key.into(),
            default_value,
            store,
        }
    }

    /// Create an accessor for a typed [`Key`] in `store`.
    pub fn for_key(key: Key<T>, default_value: Option<T>, store: Arc<dyn PrefsStore>) -> Self {
        Self::new(key.name(), default_value, store)
    }

    /// Create an accessor for `key` in the process-wide [standard](prefs_store::standard) store.
    pub fn standard(key: impl Into<String>, default_value: Option<T>) -> Self {
        Self::new(key, default_value, prefs_store::standard())
    }

    /// The key this accessor reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The default supplied at construction.
    ///
    /// [`get`](Self::get) does not fall back to it.
    pub fn default_value(&self) -> Option<&T> {
        self.default_value.as_ref()
    }

    /// Read and decode the current value.
    ///
    /// Returns `Ok(None)` when nothing is stored under the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry isn't a byte blob, if decoding fails (for example because
    /// the type definition changed), or if the store fails.
    pub fn try_get(&self) -> Result<Option<T>, BackedError> {
        match self.store.get_native(&self.key)? {
            Some(NativeValue::Data(bytes)) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Some(other) => Err(BackedError::TypeMismatch {
                key: self.key.clone(),
                expected: "data",
                found: other.kind(),
            }),
            None => Ok(None),
        }
    }

    /// Read the current value.
    ///
    /// Returns `None` if the key doesn't exist or if the entry can't be decoded. Errors are
    /// logged but do not propagate.
    pub fn get(&self) -> Option<T> {
        match self.try_get() {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read backed value '{}': {:?}", self.key, e);
                None
            }
        }
    }

    /// Encode and store `value`, or remove the entry when `value` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails, or if encoding fails. A value that can't be encoded
    /// still removes the existing entry.
    pub fn try_set(&self, value: Option<&T>) -> Result<(), BackedError> {
        let Some(value) = value else {
            debug!("Removing backed value '{}'", self.key);
            self.store.remove(&self.key)?;
            return Ok(());
        };

        match serde_json::to_vec(value) {
            Ok(bytes) => {
                self.store.set_bytes(&self.key, bytes)?;
                Ok(())
            }
            Err(e) => {
                self.store.remove(&self.key)?;
                Err(e.into())
            }
        }
    }

    /// Store `value`, or remove the entry when `value` is `None`. Errors are logged but do not
    /// propagate.
    pub fn set(&self, value: Option<&T>) {
        if let Err(e) = self.try_set(value) {
            warn!("Failed to write backed value '{}': {:?}", self.key, e);
        }
    }

    /// Remove the entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn try_remove(&self) -> Result<(), BackedError> {
        self.try_set(None)
    }

    /// Remove the entry. Errors are logged but do not propagate.
    pub fn remove(&self) {
        self.set(None);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use prefs_store::MemoryPrefsStore;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct AppConfig {
        theme: String,
        auto_save: bool,
    }

    fn config() -> AppConfig {
        AppConfig {
            theme: "dark".to_string(),
            auto_save: true,
        }
    }

    fn store() -> Arc<dyn PrefsStore> {
        Arc::new(MemoryPrefsStore::new())
    }

    #[test]
    fn round_trips_structured_value() {
        let backed = CodableBacked::<AppConfig>::new("config", None, store());

        backed.set(Some(&config()));

        assert_eq!(backed.get(), Some(config()));
    }

    #[test]
    fn stores_json_bytes() {
        let store = store();
        let backed = CodableBacked::<AppConfig>::new("config", None, store.clone());

        backed.set(Some(&config()));

        assert_eq!(
            store.get_bytes("config").expect("get"),
            Some(br#"{"theme":"dark","auto_save":true}"#.to_vec())
        );
    }

    #[test]
    fn writing_none_removes_entry() {
        let store = store();
        let backed = CodableBacked::<AppConfig>::new("config", None, store.clone());
        backed.set(Some(&config()));

        backed.set(None);

        assert_eq!(backed.get(), None);
        assert!(!store.contains("config").expect("contains"));
    }

    #[test]
    fn undecodable_bytes_read_as_absent() {
        let store = store();
        store
            .set_bytes("config", b"not json".to_vec())
            .expect("set");
        let backed = CodableBacked::<AppConfig>::new("config", Some(config()), store);

        assert_eq!(backed.get(), None);
        assert!(matches!(backed.try_get(), Err(BackedError::Json(_))));
    }

    #[test]
    fn non_data_entry_reads_as_absent() {
        let store = store();
        store
            .set_native("config", NativeValue::String("dark".to_string()))
            .expect("set");
        let backed = CodableBacked::<AppConfig>::new("config", None, store);

        assert_eq!(backed.get(), None);
        assert!(matches!(
            backed.try_get(),
            Err(BackedError::TypeMismatch {
                expected: "data",
                found: "string",
                ..
            })
        ));
    }

    #[test]
    fn default_is_kept_but_not_read() {
        let backed = CodableBacked::new("config", Some(config()), store());

        assert_eq!(backed.default_value(), Some(&config()));
        assert_eq!(backed.get(), None);
    }

    #[test]
    fn typed_key_addresses_same_entry() {
        const CONFIG: Key<AppConfig> = Key::new("config");
        let store = store();

        CodableBacked::for_key(CONFIG, None, store.clone()).set(Some(&config()));

        assert_eq!(
            CodableBacked::<AppConfig>::new("config", None, store).get(),
            Some(config())
        );
    }

    #[test]
    fn unencodable_value_removes_entry() {
        // JSON object keys must be strings.
        let store = store();
        let backed = CodableBacked::<BTreeMap<Vec<u8>, u8>>::new("map", None, store.clone());
        store.set_bytes("map", b"{}".to_vec()).expect("set");

        let mut value = BTreeMap::new();
        value.insert(vec![1, 2], 3);

        assert!(matches!(
            backed.try_set(Some(&value)),
            Err(BackedError::Json(_))
        ));
        assert!(!store.contains("map").expect("contains"));
    }
}
