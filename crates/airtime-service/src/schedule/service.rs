//! Schedule storage operations: create, update, delete and list occurrences.

use std::collections::BTreeSet;

use airtime_core::config::ScheduleConfig;
use airtime_core::types::{GroupId, RecurrenceMode};
use airtime_db::db::connection::DbConnection;
use airtime_db::db::query::scheduled_track;
use airtime_db::model::scheduled_track::{NewScheduledTrack, ScheduledTrack, ScheduledTrackChangeset};
use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::artwork::ArtworkStore;
use crate::error::{ServiceError, ServiceResult};
use crate::schedule::form::ScheduleRequest;
use crate::schedule::group::{DeleteMode, DeletionScope};
use crate::schedule::recurrence::{Occurrence, RecurrenceConfig, TrackPayload, expand};
use crate::schedule::summary::{DaySummary, MonthWindow, UtcShift, summarize_month};

/// Bounds applied to a series before it is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesLimits {
    pub max_series_days: u32,
}

impl SeriesLimits {
    /// ## Errors
    /// Returns `ValidationError` if the config spans more days than allowed.
    pub fn check(&self, config: &RecurrenceConfig) -> ServiceResult<()> {
        let span = config.span_days();
        if span > usize::try_from(self.max_series_days).unwrap_or(usize::MAX) {
            return Err(ServiceError::ValidationError(format!(
                "series spans {span} days, more than the allowed {}",
                self.max_series_days
            )));
        }
        Ok(())
    }
}

impl From<&ScheduleConfig> for SeriesLimits {
    fn from(config: &ScheduleConfig) -> Self {
        Self {
            max_series_days: config.max_series_days,
        }
    }
}

/// Rows of a series after a create or a series update, in play order.
#[derive(Debug, Clone)]
pub struct SeriesOutcome {
    pub group_id: GroupId,
    pub tracks: Vec<ScheduledTrack>,
}

/// Rows removed by a delete.
#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    pub scope: DeletionScope,
    pub deleted: Vec<ScheduledTrack>,
}

fn new_row(occurrence: &Occurrence) -> NewScheduledTrack<'_> {
    let payload = &occurrence.payload;
    NewScheduledTrack {
        station_id: payload.station_id,
        group_id: Some(occurrence.group_id.as_uuid()),
        track_id: &payload.track_id,
        artist_id: payload.artist_id.as_deref(),
        track_name: &payload.track_name,
        artist_name: &payload.artist_name,
        track_view_url: payload.track_view_url.as_deref(),
        artwork_url: payload.artwork_url.as_deref(),
        date_scheduled: occurrence.date_scheduled,
    }
}

fn changeset(
    payload: &TrackPayload,
    date_scheduled: chrono::NaiveDateTime,
    group_id: Option<GroupId>,
) -> ScheduledTrackChangeset<'_> {
    ScheduledTrackChangeset {
        group_id: group_id.map(GroupId::as_uuid),
        track_id: &payload.track_id,
        artist_id: payload.artist_id.as_deref(),
        track_name: &payload.track_name,
        artist_name: &payload.artist_name,
        track_view_url: payload.track_view_url.as_deref(),
        artwork_url: payload.artwork_url.as_deref(),
        date_scheduled,
        updated_at: chrono::Utc::now(),
    }
}

fn not_found(station_id: uuid::Uuid, id: uuid::Uuid) -> ServiceError {
    ServiceError::NotFound(format!("scheduled track {id} of station {station_id}"))
}

fn warn_if_unrecognized(config: &RecurrenceConfig) {
    if config.mode == RecurrenceMode::Unrecognized {
        tracing::warn!("Recurrence mode not recognized; no days will match");
    }
}

/// ## Summary
/// Fetches one occurrence of a station.
///
/// ## Errors
/// Returns `NotFound` if the occurrence does not exist for the station.
#[tracing::instrument(skip(conn))]
pub async fn get_occurrence(
    conn: &mut DbConnection<'_>,
    station_id: uuid::Uuid,
    id: uuid::Uuid,
) -> ServiceResult<ScheduledTrack> {
    scheduled_track::get(conn, station_id, id)
        .await?
        .ok_or_else(|| not_found(station_id, id))
}

/// ## Summary
/// Lists every occurrence of a station in play order.
///
/// ## Errors
/// Returns an error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list_all(
    conn: &mut DbConnection<'_>,
    station_id: uuid::Uuid,
) -> ServiceResult<Vec<ScheduledTrack>> {
    Ok(scheduled_track::list_by_station(conn, station_id).await?)
}

/// ## Summary
/// Expands a scheduling request and stores the whole series.
///
/// A request whose filter matches no day stores nothing and still succeeds.
///
/// ## Side Effects
/// - Inserts one row per matching day, all sharing a new group id
///
/// ## Errors
/// Returns `ValidationError` if the series is too long, or a database error if
/// the insert fails; in that case nothing is stored.
#[tracing::instrument(skip(conn, request), fields(
    station_id = %request.payload.station_id,
    mode = %request.config.mode,
    span_days = request.config.span_days()
))]
pub async fn create_series(
    conn: &mut DbConnection<'_>,
    request: &ScheduleRequest,
    limits: SeriesLimits,
) -> ServiceResult<SeriesOutcome> {
    limits.check(&request.config)?;
    warn_if_unrecognized(&request.config);

    let expansion = expand(&request.config, &request.payload, false);
    let group_id = expansion.group_id;
    tracing::debug!(group_id = %group_id, occurrences = expansion.len(), "Expanded series");

    if expansion.is_empty() {
        tracing::info!(group_id = %group_id, "No day matched the recurrence filter");
        return Ok(SeriesOutcome {
            group_id,
            tracks: Vec::new(),
        });
    }

    let occurrences = expansion.occurrences;

    let tracks = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            async move {
                let rows: Vec<NewScheduledTrack<'_>> = occurrences.iter().map(new_row).collect();
                Ok(scheduled_track::insert_batch(tx, &rows).await?)
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(group_id = %group_id, count = tracks.len(), "Series scheduled");

    Ok(SeriesOutcome { group_id, tracks })
}

/// ## Summary
/// Rewrites one occurrence and takes it out of its series.
///
/// Recurrence fields of the request are ignored; the occurrence moves to the
/// request's start date-time.
///
/// ## Side Effects
/// - Updates the row and clears its group id
/// - Removes the previous artwork file if nothing references it anymore
///
/// ## Errors
/// Returns `NotFound` if the occurrence does not exist, a database error if the
/// update fails, or `StorageError` if orphaned artwork cannot be removed.
#[tracing::instrument(skip(conn, artwork, request))]
pub async fn update_single(
    conn: &mut DbConnection<'_>,
    artwork: &ArtworkStore,
    station_id: uuid::Uuid,
    id: uuid::Uuid,
    request: &ScheduleRequest,
) -> ServiceResult<ScheduledTrack> {
    let existing = get_occurrence(conn, station_id, id).await?;

    let changes = changeset(&request.payload, request.config.start, None);
    let updated = scheduled_track::update(conn, station_id, id, &changes)
        .await?
        .ok_or_else(|| not_found(station_id, id))?;

    tracing::info!(previous_group = ?existing.group_id, "Occurrence updated and detached");

    release_artwork(conn, artwork, existing.artwork_url).await?;

    Ok(updated)
}

/// ## Summary
/// Replaces the series of an occurrence with a fresh expansion of `request`.
///
/// The addressed row is kept and rewritten to the request's start; the other
/// members of its old series are deleted and the remaining matching days are
/// inserted under a new group id shared with the kept row.
///
/// ## Side Effects
/// - Deletes the other members of the old group
/// - Updates the addressed row
/// - Inserts the regenerated occurrences
/// - Removes artwork files no longer referenced
///
/// ## Errors
/// Returns `ValidationError` if the series is too long, `NotFound` if the
/// occurrence does not exist, or a database error; database changes are rolled
/// back together.
#[tracing::instrument(skip(conn, artwork, request), fields(mode = %request.config.mode))]
pub async fn update_series(
    conn: &mut DbConnection<'_>,
    artwork: &ArtworkStore,
    station_id: uuid::Uuid,
    id: uuid::Uuid,
    request: &ScheduleRequest,
    limits: SeriesLimits,
) -> ServiceResult<SeriesOutcome> {
    limits.check(&request.config)?;
    warn_if_unrecognized(&request.config);

    let existing = get_occurrence(conn, station_id, id).await?;

    let expansion = expand(&request.config, &request.payload, true);
    let group_id = expansion.group_id;
    let occurrences = expansion.occurrences;
    let payload = request.payload.clone();
    let start = request.config.start;
    let old_group = existing.group_id;

    let (updated, removed, inserted) = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            async move {
                let removed = match old_group {
                    Some(old_group) => {
                        scheduled_track::delete_by_group(tx, station_id, old_group, Some(id)).await?
                    }
                    None => Vec::new(),
                };

                let changes = changeset(&payload, start, Some(group_id));
                let updated = scheduled_track::update(tx, station_id, id, &changes)
                    .await?
                    .ok_or_else(|| not_found(station_id, id))?;

                let rows: Vec<NewScheduledTrack<'_>> = occurrences.iter().map(new_row).collect();
                let inserted = scheduled_track::insert_batch(tx, &rows).await?;

                Ok((updated, removed, inserted))
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(
        group_id = %group_id,
        removed = removed.len(),
        inserted = inserted.len(),
        "Series replaced"
    );

    let released = removed
        .into_iter()
        .filter_map(|track| track.artwork_url)
        .chain(existing.artwork_url);
    release_artwork(conn, artwork, released).await?;

    let mut tracks = Vec::with_capacity(inserted.len() + 1);
    tracks.push(updated);
    tracks.extend(inserted);
    tracks.sort_by(|a, b| a.date_scheduled.cmp(&b.date_scheduled).then(a.id.cmp(&b.id)));

    Ok(SeriesOutcome { group_id, tracks })
}

/// ## Summary
/// Deletes an occurrence, or its whole series, depending on `mode`.
///
/// ## Side Effects
/// - Deletes the rows in scope
/// - Removes artwork files no longer referenced
///
/// ## Errors
/// Returns `NotFound` if the occurrence does not exist, a database error if
/// the delete fails, or `StorageError` if orphaned artwork cannot be removed.
#[tracing::instrument(skip(conn, artwork))]
pub async fn delete_occurrence(
    conn: &mut DbConnection<'_>,
    artwork: &ArtworkStore,
    station_id: uuid::Uuid,
    id: uuid::Uuid,
    mode: DeleteMode,
) -> ServiceResult<DeleteOutcome> {
    let existing = get_occurrence(conn, station_id, id).await?;
    let scope = DeletionScope::resolve(&existing, mode);

    tracing::debug!(scope = ?scope, "Resolved deletion scope");

    let deleted = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            async move {
                let deleted = match scope {
                    DeletionScope::Single(id) => {
                        scheduled_track::delete_by_id(tx, station_id, id).await?
                    }
                    DeletionScope::Group(group_id) => {
                        scheduled_track::delete_by_group(tx, station_id, group_id.as_uuid(), None)
                            .await?
                    }
                };
                Ok(deleted)
            }
            .scope_boxed()
        })
        .await?;

    if deleted.is_empty() {
        return Err(not_found(station_id, id));
    }

    tracing::info!(count = deleted.len(), "Scheduled tracks deleted");

    release_artwork(conn, artwork, deleted.iter().filter_map(|t| t.artwork_url.clone())).await?;

    Ok(DeleteOutcome { scope, deleted })
}

/// ## Summary
/// Deletes every occurrence of a station, grouped or not.
///
/// A station without occurrences is not an error.
///
/// ## Errors
/// Returns a database error if the delete fails, or `StorageError` if
/// orphaned artwork cannot be removed.
#[tracing::instrument(skip(conn, artwork))]
pub async fn delete_all(
    conn: &mut DbConnection<'_>,
    artwork: &ArtworkStore,
    station_id: uuid::Uuid,
) -> ServiceResult<Vec<ScheduledTrack>> {
    let deleted = scheduled_track::delete_by_station(conn, station_id).await?;

    tracing::info!(count = deleted.len(), "Station schedule cleared");

    release_artwork(conn, artwork, deleted.iter().filter_map(|t| t.artwork_url.clone())).await?;

    Ok(deleted)
}

/// ## Summary
/// Counts a station's plays per local day of one month.
///
/// ## Errors
/// Returns `ValidationError` for an invalid month, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn month_summary(
    conn: &mut DbConnection<'_>,
    station_id: uuid::Uuid,
    year: i32,
    month: u32,
    shift: UtcShift,
) -> ServiceResult<Vec<DaySummary>> {
    let window = MonthWindow::new(year, month)?;
    let (from, until) = window.utc_bounds();

    let scheduled = scheduled_track::scheduled_times_between(conn, station_id, from, until).await?;

    Ok(summarize_month(&window, &shift, scheduled))
}

/// ## Summary
/// Removes artwork files whose URL no row references anymore.
///
/// Returns the URLs whose files were deleted.
///
/// ## Errors
/// Returns a database error if a reference count fails, or `StorageError` if a
/// present file cannot be deleted.
pub async fn release_artwork(
    conn: &mut DbConnection<'_>,
    artwork: &ArtworkStore,
    urls: impl IntoIterator<Item = String>,
) -> ServiceResult<Vec<String>> {
    let candidates: BTreeSet<String> = urls.into_iter().collect();
    let mut removed = Vec::new();

    for url in candidates {
        if scheduled_track::count_by_artwork(conn, &url).await? > 0 {
            continue;
        }
        if artwork.remove(&url).await? {
            removed.push(url);
        }
    }

    Ok(removed)
}
