use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::OptionalExtension;

use crate::{NativeValue, PrefsStore, StoreError};

/// Preference store persisted to a SQLite database.
///
/// Entries live in a single `preferences` table, each value stored as the JSON encoding of its
/// [`NativeValue`]. Clones share the same connection.
#[derive(Clone)]
pub struct SqlitePrefsStore(Arc<Mutex<rusqlite::Connection>>);

impl std::fmt::Debug for SqlitePrefsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlitePrefsStore").finish()
    }
}

impl SqlitePrefsStore {
    /// Opens (or creates) the database `<folder_path>/<db_name>.sqlite`.
    ///
    /// Different suites of preferences should use different database names.
    pub fn open(folder_path: &Path, db_name: &str) -> Result<Self, StoreError> {
        std::fs::create_dir_all(folder_path)?;
        let path = folder_path.join(format!("{db_name}.sqlite"));

        let db = rusqlite::Connection::open(&path)?;

        // Set WAL mode for better concurrency
        db.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;

        tracing::debug!(path = %path.display(), "Opened preferences database");
        Self::initialize(db)
    }

    /// Opens a database that only lives as long as this store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::initialize(rusqlite::Connection::open_in_memory()?)
    }

    fn initialize(db: rusqlite::Connection) -> Result<Self, StoreError> {
        db.execute(
            "CREATE TABLE IF NOT EXISTS preferences (key TEXT PRIMARY KEY, value TEXT NOT NULL);",
            [],
        )?;
        Ok(SqlitePrefsStore(Arc::new(Mutex::new(db))))
    }
}

impl PrefsStore for SqlitePrefsStore {
    fn get_native(&self, key: &str) -> Result<Option<NativeValue>, StoreError> {
        let conn = self.0.lock().expect("Mutex should not be poisoned");
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn set_native(&self, key: &str, value: NativeValue) -> Result<(), StoreError> {
        let value = serde_json::to_string(&value)?;

        let mut conn = self.0.lock().expect("Mutex should not be poisoned");
        let transaction = conn.transaction()?;

        transaction.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, value],
        )?;

        transaction.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.0.lock().expect("Mutex should not be poisoned");
        let transaction = conn.transaction()?;

        transaction.execute(
            "DELETE FROM preferences WHERE key = ?1",
            rusqlite::params![key],
        )?;

        transaction.commit()?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.0.lock().expect("Mutex should not be poisoned");
        let mut stmt = conn.prepare("SELECT key FROM preferences ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }
}
