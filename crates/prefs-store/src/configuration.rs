use std::{path::PathBuf, sync::Arc};

use serde::Deserialize;

use crate::{MemoryPrefsStore, PrefsStore, SqlitePrefsStore, StoreError};

/// Configuration for the backend of a preference store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfiguration {
    /// Entries are kept in memory and lost when the process exits.
    Memory,

    /// Entries are persisted to a SQLite database.
    Sqlite {
        /// The name of the database. Different preference suites should use different names.
        db_name: String,
        /// The folder the database file is created in.
        folder_path: PathBuf,
    },
}

/// Opens the store described by `configuration`.
pub fn open_store(configuration: StoreConfiguration) -> Result<Arc<dyn PrefsStore>, StoreError> {
    match configuration {
        StoreConfiguration::Memory => Ok(Arc::new(MemoryPrefsStore::new())),
        StoreConfiguration::Sqlite {
            db_name,
            folder_path,
        } => Ok(Arc::new(SqlitePrefsStore::open(&folder_path, &db_name)?)),
    }
}
