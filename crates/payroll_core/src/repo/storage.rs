//! Storage backends holding one JSON document per collection.
//!
//! # Responsibility
//! - Read and write raw collection payloads by key.
//! - Keep medium-specific details (SQL, in-process maps) out of the repository.
//!
//! # Invariants
//! - `read` returns `None` for a collection that was never written.
//! - `write` either stores the whole payload or reports an error.

use crate::db::{open_db, open_db_in_memory, DbError, DbResult};
use crate::repo::Collection;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Error raised by a storage backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// The backend refused the write (capacity, read-only medium, ...).
    WriteRejected(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::WriteRejected(reason) => write!(f, "write rejected: {reason}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::WriteRejected(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key/value medium for serialized collections.
pub trait StorageBackend {
    fn read(&self, collection: Collection) -> Result<Option<String>, StorageError>;
    fn write(&mut self, collection: Collection, payload: &str) -> Result<(), StorageError>;
}

/// SQLite-backed storage using the `collections` table.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Underlying connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl StorageBackend for SqliteStorage {
    fn read(&self, collection: Collection) -> Result<Option<String>, StorageError> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM collections WHERE key = ?1;",
                [collection.key()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write(&mut self, collection: Collection, payload: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO collections (key, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![collection.key(), payload],
        )?;
        Ok(())
    }
}

/// In-process storage for tests and ephemeral sessions.
///
/// Writes can be switched off to simulate a full or read-only medium.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    payloads: HashMap<Collection, String>,
    reject_writes: bool,
}

impl MemoryStorage {
    /// Empty storage accepting writes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a collection with a raw payload.
    pub fn with_payload(mut self, collection: Collection, payload: impl Into<String>) -> Self {
        self.payloads.insert(collection, payload.into());
        self
    }

    /// Makes every following `write` fail until switched back.
    pub fn set_reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    /// Returns the raw stored payload, if any.
    pub fn payload(&self, collection: Collection) -> Option<&str> {
        self.payloads.get(&collection).map(String::as_str)
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, collection: Collection) -> Result<Option<String>, StorageError> {
        Ok(self.payloads.get(&collection).cloned())
    }

    fn write(&mut self, collection: Collection, payload: &str) -> Result<(), StorageError> {
        if self.reject_writes {
            return Err(StorageError::WriteRejected(format!(
                "memory storage is read-only (collection `{collection}`)"
            )));
        }
        self.payloads.insert(collection, payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStorage, SqliteStorage, StorageBackend, StorageError};
    use crate::repo::Collection;

    #[test]
    fn memory_storage_reads_what_was_written() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read(Collection::Teams).unwrap(), None);

        storage.write(Collection::Teams, "[]").unwrap();
        assert_eq!(storage.read(Collection::Teams).unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.read(Collection::Workers).unwrap(), None);
    }

    #[test]
    fn memory_storage_can_reject_writes() {
        let mut storage = MemoryStorage::new().with_payload(Collection::Workers, "[]");
        storage.set_reject_writes(true);

        let err = storage
            .write(Collection::Workers, "[{}]")
            .expect_err("write should be rejected");
        assert!(matches!(err, StorageError::WriteRejected(_)));
        assert_eq!(storage.payload(Collection::Workers), Some("[]"));
    }

    #[test]
    fn sqlite_storage_upserts_payload() {
        let mut storage = SqliteStorage::in_memory().unwrap();
        assert_eq!(storage.read(Collection::Containers).unwrap(), None);

        storage.write(Collection::Containers, "[1]").unwrap();
        storage.write(Collection::Containers, "[1,2]").unwrap();
        assert_eq!(
            storage.read(Collection::Containers).unwrap().as_deref(),
            Some("[1,2]")
        );
    }
}
