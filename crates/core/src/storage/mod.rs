//! Storage layer
//!
//! The cafe directory itself lives in memory. The only state written to disk
//! is the device-local key/value store used by the eligibility gate, kept in
//! SQLite.

mod local_storage;
mod memory;
mod migrations;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::Result;

pub use local_storage::LocalStorageStore;
pub use memory::{MemoryDirectory, MemoryStorage};
pub use traits::{DirectoryRepository, LocalStorage};

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> Result<Self> {
        let version = migrations::migrate(&mut conn)?;
        debug!(version, "Local store ready");
        Ok(Self { conn })
    }

    /// Applied schema version of the store
    pub fn schema_version(&self) -> Result<u32> {
        migrations::schema_version(&self.conn)
    }

    /// Get the key/value store
    pub fn local_storage(&self) -> LocalStorageStore<'_> {
        LocalStorageStore::new(&self.conn)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl LocalStorage for Database {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.local_storage().get(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.local_storage().set(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.local_storage().remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_runs_migrations() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.schema_version().unwrap(), 1);
    }
}
