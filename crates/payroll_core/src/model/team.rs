//! Team domain model.
//!
//! # Invariants
//! - A team is exactly two distinct workers on one calendar date.
//! - Pair order is kept as provided; it only matters for display.
//! - Per-date worker uniqueness is enforced by the team service at creation
//!   time, not by this type.

use crate::id::{generate_id, EntityId};
use crate::model::creation_timestamp;
use crate::model::worker::WorkerId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type TeamId = EntityId;

/// Date-scoped pairing of two workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub date: NaiveDate,
    /// Serialized as a two-element JSON array.
    pub workers: [WorkerId; 2],
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Creates a team of `first` and `second` with a generated id.
    ///
    /// Does not check availability; use `TeamService::add`.
    pub fn new(date: NaiveDate, first: WorkerId, second: WorkerId) -> Self {
        Self {
            id: generate_id(),
            date,
            workers: [first, second],
            created_at: creation_timestamp(),
        }
    }

    /// Returns whether `worker_id` is one of the two members.
    pub fn includes(&self, worker_id: &str) -> bool {
        self.workers.iter().any(|member| member == worker_id)
    }
}

#[cfg(test)]
mod tests {
    use super::Team;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    #[test]
    fn includes_checks_both_slots() {
        let team = Team::new(day(), "a".to_string(), "b".to_string());
        assert!(team.includes("a"));
        assert!(team.includes("b"));
        assert!(!team.includes("c"));
    }

    #[test]
    fn serializes_date_and_pair_in_storage_shape() {
        let team = Team::new(day(), "a".to_string(), "b".to_string());
        let value = serde_json::to_value(&team).unwrap();
        assert_eq!(value["date"], "2024-03-04");
        assert_eq!(value["workers"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn rejects_pair_with_wrong_arity() {
        let raw = r#"{"id":"t1","date":"2024-03-04","workers":["a"],"createdAt":"2024-03-04T08:00:00.000Z"}"#;
        assert!(serde_json::from_str::<Team>(raw).is_err());
    }
}
