//! Collection persistence: storage backends and the in-memory repository.
//!
//! # Responsibility
//! - Keep the three record collections (`workers`, `teams`, `containers`)
//!   in memory and write them through a pluggable storage backend.
//! - Report storage faults as values, never as panics.
//!
//! # Invariants
//! - Reads are total: an absent collection reads as empty.
//! - A failed save leaves the in-memory collection untouched.
//!
//! # See also
//! - `service` for the business rules layered on top.

pub mod repository;
pub mod storage;

use crate::id::EntityId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use repository::{Record, Repository};
pub use storage::{MemoryStorage, SqliteStorage, StorageBackend, StorageError};

pub type RepoResult<T> = Result<T, RepoError>;

/// Named collection in the storage contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Workers,
    Teams,
    Containers,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Self::Workers, Self::Teams, Self::Containers];

    /// Storage key used by every backend.
    pub fn key(self) -> &'static str {
        match self {
            Self::Workers => "workers",
            Self::Teams => "teams",
            Self::Containers => "containers",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Repository-level error for collection reads and writes.
#[derive(Debug)]
pub enum RepoError {
    /// The backend could not persist or load a collection.
    Persistence {
        collection: Collection,
        source: StorageError,
    },
    /// Records could not be encoded as JSON.
    Serialization {
        collection: Collection,
        source: serde_json::Error,
    },
    /// A stored payload does not match the record shape.
    InvalidData {
        collection: Collection,
        message: String,
    },
    /// No record with this id exists in the addressed collection.
    NotFound(EntityId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persistence { collection, source } => {
                write!(f, "failed to persist `{collection}`: {source}")
            }
            Self::Serialization { collection, source } => {
                write!(f, "failed to encode `{collection}`: {source}")
            }
            Self::InvalidData {
                collection,
                message,
            } => write!(f, "invalid stored `{collection}` data: {message}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            Self::InvalidData { .. } | Self::NotFound(_) => None,
        }
    }
}
