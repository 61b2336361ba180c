//! Container ledger use-cases.
//!
//! # Responsibility
//! - Record processed containers with their computed payment.
//! - Answer history queries by worker and by inclusive date range.
//! - Summarize a worker's earnings over a period.
//!
//! # Invariants
//! - Payment fields are fixed at creation (see `payment`).
//! - Worker lookups join through the *current* teams; containers whose team
//!   was deleted match no worker but are never removed.

use crate::model::container::{Container, NewContainer};
use crate::model::team::Team;
use crate::repo::{RepoError, Repository, StorageBackend};
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for container use-cases.
#[derive(Debug)]
pub enum ContainerServiceError {
    /// Package count must be a positive integer.
    InvalidPackageCount(u32),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ContainerServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPackageCount(count) => {
                write!(f, "package count must be positive, got {count}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContainerServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InvalidPackageCount(_) => None,
        }
    }
}

impl From<RepoError> for ContainerServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Inclusive calendar date range.
///
/// A range with `start > end` contains no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Range covering `start..=end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns whether `date` lies within the range, ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Combined history filter; `None` fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerFilter {
    pub worker_id: Option<String>,
    pub date_range: Option<DateRange>,
}

/// One worker's share over a set of containers.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerEarnings {
    pub containers: usize,
    pub packages: u64,
    pub total_payment: f64,
}

/// Container ledger bound to one repository.
pub struct ContainerService<'r, B: StorageBackend> {
    repo: &'r mut Repository<B>,
}

impl<'r, B: StorageBackend> ContainerService<'r, B> {
    /// Creates a ledger over `repo` for the duration of the borrow.
    pub fn new(repo: &'r mut Repository<B>) -> Self {
        Self { repo }
    }

    /// Records a container and returns the stored record.
    ///
    /// The team reference is not checked; a dangling team id is stored as-is.
    ///
    /// # Errors
    /// - `InvalidPackageCount` for a zero count; nothing is written.
    /// - `Repo` when the write fails; nothing is kept.
    pub fn add(&mut self, input: &NewContainer) -> Result<Container, ContainerServiceError> {
        if input.package_count == 0 {
            warn!("event=container_add module=container status=rejected reason=zero_packages");
            return Err(ContainerServiceError::InvalidPackageCount(
                input.package_count,
            ));
        }

        let container = self.repo.append(Container::from_input(input))?;
        info!(
            "event=container_add module=container status=ok container_id={} team_id={} packages={} payment={}",
            container.id, container.team_id, container.package_count, container.payment
        );
        Ok(container)
    }

    /// Gets one container by id.
    pub fn get(&self, id: &str) -> Option<&Container> {
        self.repo.find::<Container>(id)
    }

    /// Every container in recording order.
    pub fn get_all(&self) -> &[Container] {
        self.repo.get_all::<Container>()
    }

    /// Containers whose current team includes `worker_id`.
    pub fn get_by_worker(&self, worker_id: &str) -> Vec<&Container> {
        self.get_all()
            .iter()
            .filter(|container| self.worked_on(container, worker_id))
            .collect()
    }

    /// Containers dated within `start..=end`.
    pub fn get_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Container> {
        let range = DateRange::new(start, end);
        self.get_all()
            .iter()
            .filter(|container| range.contains(container.date))
            .collect()
    }

    /// Applies every set criterion of `filter`, keeping recording order.
    pub fn filter(&self, filter: &ContainerFilter) -> Vec<&Container> {
        self.get_all()
            .iter()
            .filter(|container| {
                filter
                    .worker_id
                    .as_deref()
                    .map_or(true, |worker_id| self.worked_on(container, worker_id))
            })
            .filter(|container| {
                filter
                    .date_range
                    .map_or(true, |range| range.contains(container.date))
            })
            .collect()
    }

    /// Filtered containers, latest date first; ties keep recording order.
    pub fn history(&self, filter: &ContainerFilter) -> Vec<&Container> {
        let mut containers = self.filter(filter);
        containers.sort_by(|a, b| b.date.cmp(&a.date));
        containers
    }

    /// Sums `worker_id`'s share over the containers they worked on.
    pub fn earnings(&self, worker_id: &str, range: Option<DateRange>) -> WorkerEarnings {
        let filter = ContainerFilter {
            worker_id: Some(worker_id.to_string()),
            date_range: range,
        };
        let containers = self.filter(&filter);
        WorkerEarnings {
            containers: containers.len(),
            packages: containers
                .iter()
                .map(|container| u64::from(container.package_count))
                .sum(),
            total_payment: containers
                .iter()
                .map(|container| container.payment_per_worker)
                .sum(),
        }
    }

    fn worked_on(&self, container: &Container, worker_id: &str) -> bool {
        self.repo
            .find::<Team>(&container.team_id)
            .is_some_and(|team| team.includes(worker_id))
    }
}
