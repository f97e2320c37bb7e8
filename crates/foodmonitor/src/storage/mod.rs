//! Storage layer for foodmonitor.
//!
//! This module provides `SQLite`-backed key-value persistence for the four
//! record collections. Each collection is stored under its own key as a JSON
//! array of records, and decoded back into typed records (with real date
//! values) on load.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::Record;

/// Key-value store for record collections.
///
/// Collections are independent: saving one never touches another.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw serialized value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn load_raw(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM collections WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Store a raw serialized value under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn save_raw(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.conn.execute(
            r"
            INSERT INTO collections (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, updated_at],
        )?;
        debug!("Saved {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    /// Load the collection for `R`, or `None` if it has never been saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or the stored value
    /// cannot be decoded.
    pub fn load<R: Record>(&self) -> Result<Option<Vec<R>>> {
        let Some(raw) = self.load_raw(R::KEY)? else {
            debug!("No stored value for '{}'", R::KEY);
            return Ok(None);
        };
        let records: Vec<R> = serde_json::from_str(&raw).map_err(|source| {
            Error::CorruptCollection {
                key: R::KEY,
                source,
            }
        })?;
        debug!("Loaded {} records from '{}'", records.len(), R::KEY);
        Ok(Some(records))
    }

    /// Load the collection for `R`, falling back to its seed.
    ///
    /// A seeded collection is saved immediately so that seed values derived
    /// from `now` stay fixed across later loads.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or saving fails.
    pub fn load_or_seed<R: Record>(&self, now: DateTime<Utc>) -> Result<Vec<R>> {
        if let Some(records) = self.load::<R>()? {
            return Ok(records);
        }
        let seed = R::seed(now);
        info!("Seeding '{}' with {} records", R::KEY, seed.len());
        self.save(&seed)?;
        Ok(seed)
    }

    /// Replace the stored collection for `R`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database operation fails.
    pub fn save<R: Record>(&self, records: &[R]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.save_raw(R::KEY, &raw)
    }

    /// Delete the value stored under `key`.
    ///
    /// Returns `true` if a value was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM collections WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }

    /// Delete every stored collection.
    ///
    /// Returns the number of collections removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear(&self) -> Result<usize> {
        let affected = self.conn.execute("DELETE FROM collections", [])?;
        if affected > 0 {
            info!("Cleared {} stored collections", affected);
        }
        Ok(affected)
    }

    /// Keys of all stored collections, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM collections ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let collections: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM collections", [], |row| row.get(0))?;

        let last: Option<String> = self
            .conn
            .query_row(
                "SELECT MAX(updated_at) FROM collections",
                [],
                |row| row.get(0),
            )
            .optional()?
            .flatten();

        let last_saved = last
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            collections: usize::try_from(collections).unwrap_or(0),
            last_saved,
            db_size_bytes,
        })
    }

    /// Make every later write fail while reads keep working.
    #[cfg(test)]
    pub(crate) fn fail_writes(&self) {
        self.conn.execute_batch("PRAGMA query_only = ON").unwrap();
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of collections persisted.
    pub collections: usize,
    /// When any collection was last written.
    pub last_saved: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
