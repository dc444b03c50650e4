//! Series membership and the scope of a delete.

use airtime_core::types::GroupId;
use airtime_db::model::scheduled_track::ScheduledTrack;
use serde::Deserialize;

/// What a delete addressed at one occurrence removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// Only the addressed occurrence.
    Single,
    /// The whole series the occurrence belongs to, or the occurrence alone if
    /// it belongs to none.
    #[default]
    Group,
}

/// Rows affected by a delete, resolved before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionScope {
    Single(uuid::Uuid),
    Group(GroupId),
}

impl DeletionScope {
    /// ## Summary
    /// Resolves the scope of deleting `track` under `mode`.
    #[must_use]
    pub fn resolve(track: &ScheduledTrack, mode: DeleteMode) -> Self {
        match mode {
            DeleteMode::Single => Self::Single(track.id),
            DeleteMode::Group => resolve_deletion_scope(track),
        }
    }
}

/// ## Summary
/// A grouped occurrence takes its whole group with it; an ungrouped one goes alone.
#[must_use]
pub fn resolve_deletion_scope(track: &ScheduledTrack) -> DeletionScope {
    track.group_id.map_or(DeletionScope::Single(track.id), |group_id| {
        DeletionScope::Group(GroupId::from_uuid(group_id))
    })
}
