use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::{NativeValue, PrefsStore, StoreError};

/// In-memory preference store.
///
/// Clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryPrefsStore {
    entries: Arc<RwLock<HashMap<String, NativeValue>>>,
}

impl std::fmt::Debug for MemoryPrefsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryPrefsStore").finish()
    }
}

impl MemoryPrefsStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn get_native(&self, key: &str) -> Result<Option<NativeValue>, StoreError> {
        Ok(self
            .entries
            .read()
            .expect("RwLock should not be poisoned")
            .get(key)
            .cloned())
    }

    fn set_native(&self, key: &str, value: NativeValue) -> Result<(), StoreError> {
        self.entries
            .write()
            .expect("RwLock should not be poisoned")
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .expect("RwLock should not be poisoned")
            .remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .expect("RwLock should not be poisoned")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}
