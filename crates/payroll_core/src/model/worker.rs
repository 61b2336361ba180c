//! Worker domain model.
//!
//! # Invariants
//! - `active` defaults to `true` on creation.
//! - Deleting a worker does not touch teams that reference it; read paths
//!   must tolerate the dangling id.

use crate::id::{generate_id, EntityId};
use crate::model::creation_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type WorkerId = EntityId;

/// A person who can be paired into a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Worker {
    /// Creates an active worker with a generated id.
    ///
    /// The name is stored as given; field validation belongs to the caller.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            active: true,
            created_at: creation_timestamp(),
        }
    }

    /// Shallow-merges `patch` into this worker.
    pub fn apply(&mut self, patch: &WorkerPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
    }
}

/// Partial worker update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerPatch {
    pub name: Option<String>,
    pub active: Option<bool>,
}

impl WorkerPatch {
    /// Patch that only replaces the name.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Patch that only toggles the active flag.
    pub fn set_active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Worker, WorkerPatch};

    #[test]
    fn new_worker_is_active() {
        let worker = Worker::new("Anna");
        assert!(worker.active);
        assert_eq!(worker.name, "Anna");
        assert!(!worker.id.is_empty());
    }

    #[test]
    fn apply_overwrites_only_provided_fields() {
        let mut worker = Worker::new("Anna");
        let before = worker.clone();

        worker.apply(&WorkerPatch::set_active(false));
        assert!(!worker.active);
        assert_eq!(worker.name, before.name);

        worker.apply(&WorkerPatch::rename("Anna Nowak"));
        assert_eq!(worker.name, "Anna Nowak");
        assert!(!worker.active);
        assert_eq!(worker.id, before.id);
        assert_eq!(worker.created_at, before.created_at);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let worker = Worker::new("Jan");
        let value = serde_json::to_value(&worker).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["active"], true);
        assert_eq!(value["name"], "Jan");
    }
}
