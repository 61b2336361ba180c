//! Container domain model.
//!
//! # Invariants
//! - `payment` and `payment_per_worker` are computed once at creation and
//!   never recomputed, so later tier changes do not rewrite history.
//! - Containers are immutable after creation.

use crate::id::{generate_id, EntityId};
use crate::model::creation_timestamp;
use crate::model::team::TeamId;
use crate::payment::{calculate_payment, payment_per_worker};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type ContainerId = EntityId;

/// One processed shipping container and the payment it earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: ContainerId,
    pub date: NaiveDate,
    pub team_id: TeamId,
    pub package_count: u32,
    /// Total EUR for the team.
    pub payment: f64,
    /// EUR for each of the two members.
    pub payment_per_worker: f64,
    pub created_at: DateTime<Utc>,
}

/// Caller input for recording a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContainer {
    pub date: NaiveDate,
    pub team_id: TeamId,
    pub package_count: u32,
}

impl Container {
    /// Builds a full record, computing both payment fields.
    pub fn from_input(input: &NewContainer) -> Self {
        let payment = calculate_payment(input.package_count);
        Self {
            id: generate_id(),
            date: input.date,
            team_id: input.team_id.clone(),
            package_count: input.package_count,
            payment,
            payment_per_worker: payment_per_worker(payment),
            created_at: creation_timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Container, NewContainer};
    use chrono::NaiveDate;

    #[test]
    fn from_input_fixes_payment_fields() {
        let container = Container::from_input(&NewContainer {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            team_id: "team-1".to_string(),
            package_count: 1500,
        });
        assert_eq!(container.payment, 85.0);
        assert_eq!(container.payment_per_worker, 42.5);
        assert_eq!(container.team_id, "team-1");
    }

    #[test]
    fn loads_legacy_integer_amounts() {
        let raw = r#"{
            "id": "lq3x9a0k2b",
            "date": "2024-05-01",
            "teamId": "lq3x8zz",
            "packageCount": 500,
            "payment": 60,
            "paymentPerWorker": 30,
            "createdAt": "2024-05-01T10:15:30.123Z"
        }"#;
        let container: Container = serde_json::from_str(raw).unwrap();
        assert_eq!(container.payment, 60.0);
        assert_eq!(container.payment_per_worker, 30.0);
        assert_eq!(container.package_count, 500);
    }
}
