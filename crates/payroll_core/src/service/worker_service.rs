//! Worker registry use-cases.
//!
//! # Responsibility
//! - Create, update, list and delete worker records.
//!
//! # Invariants
//! - Names are stored as given; presentation-level validation (non-empty,
//!   trimmed) is the caller's job.
//! - Deleting a worker never cascades into teams.

use crate::model::worker::{Worker, WorkerPatch};
use crate::repo::{RepoError, RepoResult, Repository, StorageBackend};
use log::{info, warn};

/// Worker registry bound to one repository.
pub struct WorkerService<'r, B: StorageBackend> {
    repo: &'r mut Repository<B>,
}

impl<'r, B: StorageBackend> WorkerService<'r, B> {
    /// Creates a registry over `repo` for the duration of the borrow.
    pub fn new(repo: &'r mut Repository<B>) -> Self {
        Self { repo }
    }

    /// Registers a new active worker.
    pub fn add(&mut self, name: impl Into<String>) -> RepoResult<Worker> {
        let worker = self.repo.append(Worker::new(name))?;
        info!("event=worker_add module=worker status=ok worker_id={}", worker.id);
        Ok(worker)
    }

    /// Merges `patch` into the stored worker and returns the result.
    ///
    /// # Errors
    /// - `NotFound` when no worker has `id`; nothing is written.
    /// - `Persistence` when the write fails; the stored worker is unchanged.
    pub fn update(&mut self, id: &str, patch: &WorkerPatch) -> RepoResult<Worker> {
        let mut workers = self.repo.get_all::<Worker>().to_vec();
        let Some(worker) = workers.iter_mut().find(|worker| worker.id == id) else {
            warn!("event=worker_update module=worker status=not_found worker_id={id}");
            return Err(RepoError::NotFound(id.to_string()));
        };
        worker.apply(patch);
        let updated = worker.clone();

        self.repo.save(workers)?;
        info!("event=worker_update module=worker status=ok worker_id={id}");
        Ok(updated)
    }

    /// Removes the worker with `id`.
    ///
    /// An unknown id is not an error: the collection is still persisted and
    /// the outcome only reflects the write.
    pub fn delete(&mut self, id: &str) -> RepoResult<()> {
        let removed = self.repo.remove::<Worker>(id)?;
        info!("event=worker_delete module=worker status=ok worker_id={id} removed={removed}");
        Ok(())
    }

    /// Gets one worker by id; `None` for unknown or deleted ids.
    pub fn get(&self, id: &str) -> Option<&Worker> {
        self.repo.find::<Worker>(id)
    }

    /// All workers in registration order.
    pub fn list(&self) -> &[Worker] {
        self.repo.get_all::<Worker>()
    }

    /// Workers with `active == true`, in registration order.
    pub fn list_active(&self) -> Vec<&Worker> {
        self.list().iter().filter(|worker| worker.active).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::WorkerService;
    use crate::model::worker::WorkerPatch;
    use crate::repo::{MemoryStorage, RepoError, Repository};

    fn repo() -> Repository<MemoryStorage> {
        Repository::open(MemoryStorage::new()).unwrap()
    }

    #[test]
    fn add_appends_active_worker() {
        let mut repo = repo();
        let mut service = WorkerService::new(&mut repo);
        let anna = service.add("Anna").unwrap();
        let jan = service.add("Jan").unwrap();

        let names: Vec<&str> = service.list().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["Anna", "Jan"]);
        assert!(anna.active && jan.active);
        assert_ne!(anna.id, jan.id);
    }

    #[test]
    fn update_unknown_worker_is_not_found() {
        let mut repo = repo();
        let mut service = WorkerService::new(&mut repo);
        let err = service
            .update("ghost", &WorkerPatch::rename("Nobody"))
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(id) if id == "ghost"));
    }

    #[test]
    fn update_merges_fields() {
        let mut repo = repo();
        let mut service = WorkerService::new(&mut repo);
        let anna = service.add("Anna").unwrap();

        service
            .update(&anna.id, &WorkerPatch::set_active(false))
            .unwrap();
        let stored = service.get(&anna.id).unwrap();
        assert_eq!(stored.name, "Anna");
        assert!(!stored.active);
        assert!(service.list_active().is_empty());
    }

    #[test]
    fn failed_update_leaves_worker_unchanged() {
        let mut repo = repo();
        let anna = WorkerService::new(&mut repo).add("Anna").unwrap();
        repo.backend_mut().set_reject_writes(true);

        let mut service = WorkerService::new(&mut repo);
        assert!(service
            .update(&anna.id, &WorkerPatch::rename("Hanna"))
            .is_err());
        assert_eq!(service.get(&anna.id).unwrap().name, "Anna");
    }

    #[test]
    fn delete_unknown_id_succeeds() {
        let mut repo = repo();
        let mut service = WorkerService::new(&mut repo);
        service.add("Anna").unwrap();
        service.delete("ghost").unwrap();
        assert_eq!(service.list().len(), 1);
    }
}
