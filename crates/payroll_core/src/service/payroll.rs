//! Session facade over one repository.
//!
//! # Responsibility
//! - Own the repository for the lifetime of a session.
//! - Hand out short-lived service handles that borrow it.
//! - Flush all collections on shutdown.

use crate::repo::{RepoResult, Repository, StorageBackend};
use crate::service::container_service::ContainerService;
use crate::service::team_service::TeamService;
use crate::service::worker_service::WorkerService;
use log::info;

/// Payroll session bound to one storage backend.
pub struct Payroll<B: StorageBackend> {
    repo: Repository<B>,
}

impl<B: StorageBackend> Payroll<B> {
    /// Opens the session, loading (and seeding) every collection.
    pub fn open(backend: B) -> RepoResult<Self> {
        Ok(Self {
            repo: Repository::open(backend)?,
        })
    }

    /// Worker registry borrowing this session.
    pub fn workers(&mut self) -> WorkerService<'_, B> {
        WorkerService::new(&mut self.repo)
    }

    /// Team assignment engine borrowing this session.
    pub fn teams(&mut self) -> TeamService<'_, B> {
        TeamService::new(&mut self.repo)
    }

    /// Container ledger borrowing this session.
    pub fn containers(&mut self) -> ContainerService<'_, B> {
        ContainerService::new(&mut self.repo)
    }

    /// Read access to the underlying repository and its backend.
    pub fn repository(&self) -> &Repository<B> {
        &self.repo
    }

    /// Flushes every collection and returns the backend.
    pub fn shutdown(mut self) -> RepoResult<B> {
        self.repo.flush()?;
        info!("event=payroll_shutdown module=service status=ok");
        Ok(self.repo.into_backend())
    }
}
