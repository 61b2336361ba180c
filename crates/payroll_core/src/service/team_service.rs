//! Team assignment use-cases.
//!
//! # Responsibility
//! - Form date-scoped two-person teams.
//! - Enforce per-date worker availability at creation time.
//!
//! # Invariants
//! - For one date, a worker id appears in at most one team.
//! - A team never names the same worker twice.
//! - Rejected creations do not touch the teams collection.
//! - Deleting a team never cascades into containers.
//!
//! The read-validate-write sequence in `add` relies on a single writer.

use crate::model::team::Team;
use crate::model::worker::{Worker, WorkerId};
use crate::repo::{RepoError, Repository, StorageBackend};
use chrono::NaiveDate;
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for team use-cases.
#[derive(Debug)]
pub enum TeamServiceError {
    /// Both slots name the same worker.
    SameWorkerTwice(WorkerId),
    /// The worker already belongs to a team on that date.
    WorkerAlreadyAssigned { worker_id: WorkerId, date: NaiveDate },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TeamServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SameWorkerTwice(worker_id) => {
                write!(f, "worker {worker_id} cannot be paired with themselves")
            }
            Self::WorkerAlreadyAssigned { worker_id, date } => {
                write!(f, "worker {worker_id} is already assigned to a team on {date}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TeamServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TeamServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Team assignment engine bound to one repository.
pub struct TeamService<'r, B: StorageBackend> {
    repo: &'r mut Repository<B>,
}

impl<'r, B: StorageBackend> TeamService<'r, B> {
    /// Creates an engine over `repo` for the duration of the borrow.
    pub fn new(repo: &'r mut Repository<B>) -> Self {
        Self { repo }
    }

    /// Teams on `date`, in stored order.
    pub fn get_by_date(&self, date: NaiveDate) -> Vec<&Team> {
        self.list().iter().filter(|team| team.date == date).collect()
    }

    /// Ids of every worker already paired on `date`.
    pub fn assigned_worker_ids(&self, date: NaiveDate) -> HashSet<&str> {
        self.get_by_date(date)
            .into_iter()
            .flat_map(|team| team.workers.iter().map(String::as_str))
            .collect()
    }

    /// Registered workers still free on `date`, in registration order.
    pub fn available_workers(&self, date: NaiveDate) -> Vec<&Worker> {
        let assigned = self.assigned_worker_ids(date);
        self.repo
            .get_all::<Worker>()
            .iter()
            .filter(|worker| !assigned.contains(worker.id.as_str()))
            .collect()
    }

    /// Creates a team of `first` and `second` on `date`.
    ///
    /// # Errors
    /// - `SameWorkerTwice` when both ids are equal.
    /// - `WorkerAlreadyAssigned` when either worker is paired that day.
    /// - `Repo` when the write fails.
    pub fn add(
        &mut self,
        date: NaiveDate,
        first: impl Into<WorkerId>,
        second: impl Into<WorkerId>,
    ) -> Result<Team, TeamServiceError> {
        let first = first.into();
        let second = second.into();

        if first == second {
            warn!("event=team_add module=team status=rejected reason=same_worker_twice date={date}");
            return Err(TeamServiceError::SameWorkerTwice(first));
        }

        let busy = {
            let assigned = self.assigned_worker_ids(date);
            [&first, &second]
                .into_iter()
                .find(|candidate| assigned.contains(candidate.as_str()))
                .cloned()
        };
        if let Some(worker_id) = busy {
            warn!(
                "event=team_add module=team status=rejected reason=worker_already_assigned date={date} worker_id={worker_id}"
            );
            return Err(TeamServiceError::WorkerAlreadyAssigned { worker_id, date });
        }

        let team = self.repo.append(Team::new(date, first, second))?;
        info!(
            "event=team_add module=team status=ok team_id={} date={date}",
            team.id
        );
        Ok(team)
    }

    /// Removes the team with `id`; containers referencing it are kept.
    pub fn delete(&mut self, id: &str) -> Result<(), TeamServiceError> {
        let removed = self.repo.remove::<Team>(id)?;
        info!("event=team_delete module=team status=ok team_id={id} removed={removed}");
        Ok(())
    }

    /// Gets one team by id; `None` for unknown or deleted ids.
    pub fn get(&self, id: &str) -> Option<&Team> {
        self.repo.find::<Team>(id)
    }

    /// All teams in stored order.
    pub fn list(&self) -> &[Team] {
        self.repo.get_all::<Team>()
    }

    /// All teams, latest date first; ties keep stored order.
    pub fn list_newest_first(&self) -> Vec<&Team> {
        let mut teams: Vec<&Team> = self.list().iter().collect();
        teams.sort_by(|a, b| b.date.cmp(&a.date));
        teams
    }
}
