//! Domain records for the payroll workflow.
//!
//! # Responsibility
//! - Define the canonical shapes of workers, teams and containers.
//! - Keep the JSON field names stable: they are the storage contract.
//!
//! # Invariants
//! - Every record is identified by an opaque `EntityId`.
//! - Records reference each other by id only; no back-references are stored.

use chrono::{DateTime, SubsecRound, Utc};

pub mod container;
pub mod team;
pub mod worker;

/// Creation timestamp truncated to millisecond precision.
pub(crate) fn creation_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
