//! Core business rules for the container payroll workflow.
//! This crate is the single source of truth for payroll invariants.

pub mod db;
pub mod id;
pub mod logging;
pub mod model;
pub mod payment;
pub mod repo;
pub mod service;

pub use id::{generate_id, EntityId};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::container::{Container, ContainerId, NewContainer};
pub use model::team::{Team, TeamId};
pub use model::worker::{Worker, WorkerId, WorkerPatch};
pub use payment::{calculate_payment, payment_per_worker, TEAM_SIZE};
pub use repo::{
    Collection, MemoryStorage, Record, RepoError, RepoResult, Repository, SqliteStorage,
    StorageBackend, StorageError,
};
pub use service::container_service::{
    ContainerFilter, ContainerService, ContainerServiceError, DateRange, WorkerEarnings,
};
pub use service::payroll::Payroll;
pub use service::roster::{
    resolve_team, resolve_worker_names, worker_names_label, UNKNOWN_TEAM_LABEL,
    UNKNOWN_WORKER_LABEL,
};
pub use service::team_service::{TeamService, TeamServiceError};
pub use service::worker_service::WorkerService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
