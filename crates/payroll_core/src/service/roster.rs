//! Reference resolution for display paths.
//!
//! Teams and containers may hold ids of deleted workers or teams. Lookups
//! here return `None` for those; the sentinel labels are applied only by the
//! presentation layer.

use crate::model::team::Team;
use crate::model::worker::Worker;

/// Label shown for a worker id that no longer resolves.
pub const UNKNOWN_WORKER_LABEL: &str = "unknown worker";
/// Label shown for a team id that no longer resolves.
pub const UNKNOWN_TEAM_LABEL: &str = "unknown team";

/// Resolves each id to a worker name, keeping input order.
pub fn resolve_worker_names<'a>(workers: &'a [Worker], ids: &[String]) -> Vec<Option<&'a str>> {
    ids.iter()
        .map(|id| {
            workers
                .iter()
                .find(|worker| &worker.id == id)
                .map(|worker| worker.name.as_str())
        })
        .collect()
}

pub fn resolve_team<'a>(teams: &'a [Team], id: &str) -> Option<&'a Team> {
    teams.iter().find(|team| team.id == id)
}

/// Joins resolved names with `, `, substituting `UNKNOWN_WORKER_LABEL`.
pub fn worker_names_label(workers: &[Worker], ids: &[String]) -> String {
    resolve_worker_names(workers, ids)
        .into_iter()
        .map(|name| name.unwrap_or(UNKNOWN_WORKER_LABEL))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{resolve_team, resolve_worker_names, worker_names_label, UNKNOWN_WORKER_LABEL};
    use crate::model::team::Team;
    use crate::model::worker::Worker;
    use chrono::NaiveDate;

    #[test]
    fn dangling_worker_ids_resolve_to_none() {
        let anna = Worker::new("Anna");
        let ids = vec![anna.id.clone(), "deleted".to_string()];
        let workers = vec![anna];

        assert_eq!(
            resolve_worker_names(&workers, &ids),
            vec![Some("Anna"), None]
        );
        assert_eq!(
            worker_names_label(&workers, &ids),
            format!("Anna, {UNKNOWN_WORKER_LABEL}")
        );
    }

    #[test]
    fn dangling_team_id_resolves_to_none() {
        let team = Team::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            "a".to_string(),
            "b".to_string(),
        );
        let teams = vec![team.clone()];
        assert_eq!(resolve_team(&teams, &team.id), Some(&team));
        assert_eq!(resolve_team(&teams, "gone"), None);
    }
}
