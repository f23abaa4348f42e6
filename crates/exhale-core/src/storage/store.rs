//! SQLite-backed key-value store.
//!
//! The preference-store analog everything persists through: a single `kv`
//! table whose values are serialized records. Collections are written whole;
//! there are no incremental updates.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use crate::error::StoreError;

use super::data_dir;

/// Key-value store over an embedded SQLite database.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `~/.config/exhale/exhale.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("exhale.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the store at an explicit path. Intended for tests.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store. Intended for tests.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value, replacing any previous one.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key. Removing an absent key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_delete() {
        let store = Store::open_memory().unwrap();
        assert!(store.get("missing").unwrap().is_none());
        store.set("greeting", "hello").unwrap();
        assert_eq!(store.get("greeting").unwrap().unwrap(), "hello");
        store.set("greeting", "goodbye").unwrap();
        assert_eq!(store.get("greeting").unwrap().unwrap(), "goodbye");
        store.delete("greeting").unwrap();
        assert!(store.get("greeting").unwrap().is_none());
    }

    #[test]
    fn delete_missing_key_is_ok() {
        let store = Store::open_memory().unwrap();
        store.delete("never_written").unwrap();
    }
}
