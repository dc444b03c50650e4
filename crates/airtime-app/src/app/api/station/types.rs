//! JSON bodies returned by the station schedule endpoints.

use airtime_db::model::scheduled_track::ScheduledTrack;
use airtime_service::schedule::group::DeletionScope;
use airtime_service::schedule::service::{DeleteOutcome, SeriesOutcome};
use airtime_service::schedule::summary::DaySummary;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One scheduled play. Times are UTC.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceResponse {
    pub id: uuid::Uuid,
    pub station_id: uuid::Uuid,
    pub group_id: Option<uuid::Uuid>,
    pub track_id: String,
    pub artist_id: Option<String>,
    pub track_name: String,
    pub artist_name: String,
    pub track_view_url: Option<String>,
    pub artwork_url: Option<String>,
    pub date_scheduled: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ScheduledTrack> for OccurrenceResponse {
    fn from(track: ScheduledTrack) -> Self {
        Self {
            id: track.id,
            station_id: track.station_id,
            group_id: track.group_id,
            track_id: track.track_id,
            artist_id: track.artist_id,
            track_name: track.track_name,
            artist_name: track.artist_name,
            track_view_url: track.track_view_url,
            artwork_url: track.artwork_url,
            date_scheduled: track.date_scheduled.and_utc(),
            updated_at: track.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResponse {
    /// Absent after a single-occurrence update, which detaches the row.
    pub group_id: Option<uuid::Uuid>,
    pub count: usize,
    pub tracks: Vec<OccurrenceResponse>,
}

impl From<SeriesOutcome> for SeriesResponse {
    fn from(outcome: SeriesOutcome) -> Self {
        Self {
            group_id: Some(outcome.group_id.as_uuid()),
            count: outcome.tracks.len(),
            tracks: outcome.tracks.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    /// `single` or `group`.
    pub scope: &'static str,
    pub group_id: Option<uuid::Uuid>,
    pub deleted: usize,
    pub ids: Vec<uuid::Uuid>,
}

impl From<DeleteOutcome> for DeleteResponse {
    fn from(outcome: DeleteOutcome) -> Self {
        let (scope, group_id) = match outcome.scope {
            DeletionScope::Single(_) => ("single", None),
            DeletionScope::Group(group_id) => ("group", Some(group_id.as_uuid())),
        };
        Self {
            scope,
            group_id,
            deleted: outcome.deleted.len(),
            ids: outcome.deleted.iter().map(|track| track.id).collect(),
        }
    }
}

/// Result of clearing a station's whole schedule.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub deleted: usize,
}

/// Calendar entry of the month view.
#[derive(Debug, Serialize)]
pub struct DaySummaryResponse {
    pub date: NaiveDate,
    pub count: u64,
    pub title: String,
}

impl From<DaySummary> for DaySummaryResponse {
    fn from(day: DaySummary) -> Self {
        Self {
            title: day.title(),
            date: day.date,
            count: day.count,
        }
    }
}
