//! Persisted state store.
//!
//! Cross-run state lives in a `SQLite` database with a single key-value
//! table; install history is one JSON value under a fixed key. The
//! [`StateStore`] trait is the seam the recorder works against, so tests can
//! substitute an in-memory implementation.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use crate::history::InstallEntry;
use crate::paths::db_path;

/// Key under which the install history sequence is persisted.
const HISTORY_KEY: &str = "install_history";

/// Errors from the state store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// `SQLite` error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored value failed to (de)serialize.
    #[error("corrupt state value for '{key}': {source}")]
    Corrupt {
        /// Key whose value is corrupt.
        key: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Durable key-value store backing install history.
///
/// `set_history` must be durable before returning: a crash after a recorded
/// install loses nothing. History read-modify-write goes through one `&mut`
/// handle, which serializes writers within a process.
pub trait StateStore {
    /// Load the persisted history, oldest first. Empty if never written.
    fn get_history(&self) -> Result<Vec<InstallEntry>, StoreError>;

    /// Replace the persisted history.
    fn set_history(&mut self, entries: &[InstallEntry]) -> Result<(), StoreError>;
}

/// State database for multipack (`~/.multipack/state.db`).
#[derive(Debug)]
pub struct StateDb {
    conn: Connection,
}

impl StateDb {
    /// Open or create the state database.
    pub fn open() -> Result<Self, StoreError> {
        let path = db_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        Self::open_at(&path)
    }

    /// Open database at a specific path (for testing).
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        // WAL keeps the synchronous-write guarantee while allowing readers
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM state WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO state (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl StateStore for StateDb {
    fn get_history(&self) -> Result<Vec<InstallEntry>, StoreError> {
        match self.get_raw(HISTORY_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: HISTORY_KEY,
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    fn set_history(&mut self, entries: &[InstallEntry]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entries).map_err(|source| StoreError::Corrupt {
            key: HISTORY_KEY,
            source,
        })?;
        self.set_raw(HISTORY_KEY, &raw)
    }
}
