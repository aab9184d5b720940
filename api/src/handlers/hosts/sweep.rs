use chrono::{DateTime, TimeDelta, Utc};
use hostwatch_db::models::DbHost;
use mongodb::bson::oid::ObjectId;

/// Result of partitioning a listing snapshot by staleness.
#[derive(Debug, Default)]
pub struct Sweep {
    /// Hosts to return, in snapshot order.
    pub kept: Vec<DbHost>,

    /// Hosts to remove from the store.
    pub expired: Vec<ObjectId>,
}

/// Mark every host whose last write is more than `stale_after` before `now`,
/// then drop the marked ids from the snapshot. Hosts with no known last write
/// are never marked.
///
/// The snapshot is filtered against the marked ids rather than re-read, so the
/// result does not depend on whether the deletes that follow succeed.
pub fn sweep(hosts: Vec<DbHost>, now: DateTime<Utc>, stale_after: TimeDelta) -> Sweep {
    let expired: Vec<ObjectId> = hosts
        .iter()
        .filter(|host| host.updated_at.is_some_and(|at| now - at > stale_after))
        .map(|host| host.id)
        .collect();

    let kept = hosts
        .into_iter()
        .filter(|host| !expired.contains(&host.id))
        .collect();

    Sweep { kept, expired }
}
