//! In-memory collection state with write-through persistence.
//!
//! # Responsibility
//! - Load all three collections once at open, seeding missing ones.
//! - Expose generic `get_all`/`save` primitives over typed records.
//!
//! # Invariants
//! - `save` replaces the in-memory collection only after the backend
//!   accepted the write, so failures never leave partial state behind.
//! - Record order is the stored (insertion) order.

use crate::model::container::Container;
use crate::model::team::Team;
use crate::model::worker::Worker;
use crate::repo::storage::StorageBackend;
use crate::repo::{Collection, RepoError, RepoResult};
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Record type stored in one named collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
    fn slot(data: &CollectionData) -> &Vec<Self>;
    fn slot_mut(data: &mut CollectionData) -> &mut Vec<Self>;
}

/// The three loaded collections.
#[derive(Debug, Default, Clone)]
pub struct CollectionData {
    workers: Vec<Worker>,
    teams: Vec<Team>,
    containers: Vec<Container>,
}

impl Record for Worker {
    const COLLECTION: Collection = Collection::Workers;

    fn id(&self) -> &str {
        &self.id
    }
    fn slot(data: &CollectionData) -> &Vec<Self> {
        &data.workers
    }
    fn slot_mut(data: &mut CollectionData) -> &mut Vec<Self> {
        &mut data.workers
    }
}

impl Record for Team {
    const COLLECTION: Collection = Collection::Teams;

    fn id(&self) -> &str {
        &self.id
    }
    fn slot(data: &CollectionData) -> &Vec<Self> {
        &data.teams
    }
    fn slot_mut(data: &mut CollectionData) -> &mut Vec<Self> {
        &mut data.teams
    }
}

impl Record for Container {
    const COLLECTION: Collection = Collection::Containers;

    fn id(&self) -> &str {
        &self.id
    }
    fn slot(data: &CollectionData) -> &Vec<Self> {
        &data.containers
    }
    fn slot_mut(data: &mut CollectionData) -> &mut Vec<Self> {
        &mut data.containers
    }
}

/// Single-actor repository over a storage backend.
///
/// Constructed once per session; call [`Repository::flush`] before shutdown
/// to rewrite every collection.
pub struct Repository<B: StorageBackend> {
    backend: B,
    data: CollectionData,
}

impl<B: StorageBackend> Repository<B> {
    /// Loads every collection, seeding absent ones with an empty array.
    ///
    /// # Errors
    /// - `Persistence` when the backend cannot be read or seeded.
    /// - `InvalidData` when a stored payload does not decode.
    pub fn open(backend: B) -> RepoResult<Self> {
        let mut repo = Self {
            backend,
            data: CollectionData::default(),
        };
        repo.load::<Worker>()?;
        repo.load::<Team>()?;
        repo.load::<Container>()?;
        info!(
            "event=repo_open module=repo status=ok workers={} teams={} containers={}",
            repo.data.workers.len(),
            repo.data.teams.len(),
            repo.data.containers.len()
        );
        Ok(repo)
    }

    /// Returns every record of `T` in stored order.
    pub fn get_all<T: Record>(&self) -> &[T] {
        T::slot(&self.data)
    }

    /// Finds one record by id.
    pub fn find<T: Record>(&self, id: &str) -> Option<&T> {
        self.get_all::<T>().iter().find(|record| record.id() == id)
    }

    /// Replaces the whole `T` collection, persisting it first.
    pub fn save<T: Record>(&mut self, records: Vec<T>) -> RepoResult<()> {
        let collection = T::COLLECTION;
        self.write_through(collection, records.as_slice())?;
        *T::slot_mut(&mut self.data) = records;
        debug!(
            "event=collection_save module=repo status=ok collection={collection} records={}",
            T::slot(&self.data).len()
        );
        Ok(())
    }

    /// Appends one record and persists the collection.
    pub fn append<T: Record>(&mut self, record: T) -> RepoResult<T> {
        let mut records = self.get_all::<T>().to_vec();
        records.push(record.clone());
        self.save(records)?;
        Ok(record)
    }

    /// Removes every record with `id` and persists the collection.
    ///
    /// Returns how many records were removed; an absent id still persists.
    pub fn remove<T: Record>(&mut self, id: &str) -> RepoResult<usize> {
        let before = self.get_all::<T>().len();
        let records: Vec<T> = self
            .get_all::<T>()
            .iter()
            .filter(|record| record.id() != id)
            .cloned()
            .collect();
        let removed = before - records.len();
        self.save(records)?;
        Ok(removed)
    }

    /// Rewrites every collection to the backend.
    pub fn flush(&mut self) -> RepoResult<()> {
        let data = self.data.clone();
        self.write_through(Collection::Workers, data.workers.as_slice())?;
        self.write_through(Collection::Teams, data.teams.as_slice())?;
        self.write_through(Collection::Containers, data.containers.as_slice())?;
        info!("event=repo_flush module=repo status=ok");
        Ok(())
    }

    /// Returns the storage backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the storage backend mutably.
    ///
    /// Writing through it bypasses the in-memory collections; the next
    /// `save` or `flush` overwrites such changes.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes the repository, returning the backend without flushing.
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn load<T: Record>(&mut self) -> RepoResult<()> {
        let collection = T::COLLECTION;
        let stored = self
            .backend
            .read(collection)
            .map_err(|source| RepoError::Persistence { collection, source })?;

        let records: Vec<T> = match stored {
            Some(payload) => serde_json::from_str(&payload).map_err(|err| {
                error!(
                    "event=collection_load module=repo status=error collection={collection} error_code=invalid_payload"
                );
                RepoError::InvalidData {
                    collection,
                    message: err.to_string(),
                }
            })?,
            None => {
                self.write_through::<T>(collection, &[])?;
                debug!("event=collection_seed module=repo status=ok collection={collection}");
                Vec::new()
            }
        };

        *T::slot_mut(&mut self.data) = records;
        Ok(())
    }

    fn write_through<T: Record>(&mut self, collection: Collection, records: &[T]) -> RepoResult<()> {
        let payload = serde_json::to_string(records)
            .map_err(|source| RepoError::Serialization { collection, source })?;
        self.backend.write(collection, &payload).map_err(|source| {
            error!(
                "event=collection_save module=repo status=error collection={collection} error_code=write_failed error={source}"
            );
            RepoError::Persistence { collection, source }
        })
    }
}
