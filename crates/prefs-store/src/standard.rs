use std::sync::{Arc, OnceLock};

use crate::{open_store, MemoryPrefsStore, PrefsStore, StoreConfiguration, StoreError};

static STANDARD: OnceLock<Arc<dyn PrefsStore>> = OnceLock::new();

/// Returns the process-wide shared store.
///
/// If [`initialize_standard`] hasn't been called yet, an in-memory store is installed.
pub fn standard() -> Arc<dyn PrefsStore> {
    Arc::clone(STANDARD.get_or_init(|| {
        tracing::debug!("Standard store not initialized, using an in-memory store");
        let store: Arc<dyn PrefsStore> = Arc::new(MemoryPrefsStore::new());
        store
    }))
}

/// Installs the process-wide shared store described by `configuration`.
///
/// Must be called before the first use of [`standard`]; the standard store is never replaced.
///
/// The store is opened before it is installed. If another thread calls [`standard`] in between,
/// this returns [`StoreError::AlreadyInitialized`] and the opened store is dropped; for a SQLite
/// configuration the database file has already been created on disk by then.
pub fn initialize_standard(configuration: StoreConfiguration) -> Result<(), StoreError> {
    if STANDARD.get().is_some() {
        return Err(StoreError::AlreadyInitialized);
    }

    tracing::debug!(?configuration, "Initializing standard store");
    let store = open_store(configuration)?;
    STANDARD
        .set(store)
        .map_err(|_| StoreError::AlreadyInitialized)
}
