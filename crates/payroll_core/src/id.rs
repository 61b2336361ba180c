//! Identifier generation for new records.
//!
//! # Responsibility
//! - Produce opaque, collision-resistant string ids for workers, teams and
//!   containers without any global coordination.
//!
//! # Invariants
//! - Generated ids are unique within the practical lifetime of a dataset.
//! - Ids are opaque: callers must not parse them. Stored ids of any shape
//!   (including ones written by older data) remain valid.

use uuid::Uuid;

/// Opaque identifier shared by every persisted record.
pub type EntityId = String;

/// Generates a new opaque id.
///
/// Uses a UUIDv7 so ids combine a millisecond timestamp with random bits and
/// sort roughly by creation time.
pub fn generate_id() -> EntityId {
    Uuid::now_v7().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::generate_id;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<String> = (0..1_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn generated_ids_are_compact_hex() {
        let id = generate_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
