//! Query functions for scheduled tracks.
//!
//! Every function is scoped by station so one station can never read or mutate
//! another station's schedule through a guessed id.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::schema::scheduled_track;
use crate::model::scheduled_track::{NewScheduledTrack, ScheduledTrack, ScheduledTrackChangeset};

/// Rows per `INSERT` statement. Keeps a long series well under the Postgres
/// bind parameter limit.
pub const INSERT_CHUNK_SIZE: usize = 1_000;

/// ## Summary
/// Retrieves one scheduled track of a station.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn get(
    conn: &mut AsyncPgConnection,
    station_id: uuid::Uuid,
    id: uuid::Uuid,
) -> QueryResult<Option<ScheduledTrack>> {
    scheduled_track::table
        .filter(scheduled_track::id.eq(id))
        .filter(scheduled_track::station_id.eq(station_id))
        .select(ScheduledTrack::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Lists every scheduled track of a station in play order.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_by_station(
    conn: &mut AsyncPgConnection,
    station_id: uuid::Uuid,
) -> QueryResult<Vec<ScheduledTrack>> {
    scheduled_track::table
        .filter(scheduled_track::station_id.eq(station_id))
        .order((scheduled_track::date_scheduled.asc(), scheduled_track::id.asc()))
        .select(ScheduledTrack::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Returns the scheduled times of a station within `[from, until)`.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn scheduled_times_between(
    conn: &mut AsyncPgConnection,
    station_id: uuid::Uuid,
    from: chrono::NaiveDateTime,
    until: chrono::NaiveDateTime,
) -> QueryResult<Vec<chrono::NaiveDateTime>> {
    scheduled_track::table
        .filter(scheduled_track::station_id.eq(station_id))
        .filter(scheduled_track::date_scheduled.ge(from))
        .filter(scheduled_track::date_scheduled.lt(until))
        .order(scheduled_track::date_scheduled.asc())
        .select(scheduled_track::date_scheduled)
        .load(conn)
        .await
}

/// ## Summary
/// Inserts scheduled tracks in batches and returns the inserted rows.
///
/// Callers wanting all-or-nothing behavior run this inside a transaction.
///
/// ## Errors
/// Returns a database error if any insert fails.
pub async fn insert_batch(
    conn: &mut AsyncPgConnection,
    tracks: &[NewScheduledTrack<'_>],
) -> QueryResult<Vec<ScheduledTrack>> {
    let mut inserted = Vec::with_capacity(tracks.len());

    for chunk in tracks.chunks(INSERT_CHUNK_SIZE) {
        let rows = diesel::insert_into(scheduled_track::table)
            .values(chunk)
            .returning(ScheduledTrack::as_returning())
            .get_results(conn)
            .await?;
        inserted.extend(rows);
    }

    Ok(inserted)
}

/// ## Summary
/// Overwrites the mutable columns of one scheduled track.
///
/// Returns `None` when the row does not exist for the station.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update(
    conn: &mut AsyncPgConnection,
    station_id: uuid::Uuid,
    id: uuid::Uuid,
    changes: &ScheduledTrackChangeset<'_>,
) -> QueryResult<Option<ScheduledTrack>> {
    diesel::update(
        scheduled_track::table
            .filter(scheduled_track::id.eq(id))
            .filter(scheduled_track::station_id.eq(station_id)),
    )
    .set(changes)
    .returning(ScheduledTrack::as_returning())
    .get_result(conn)
    .await
    .optional()
}

/// ## Summary
/// Deletes one scheduled track and returns it if it existed.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_by_id(
    conn: &mut AsyncPgConnection,
    station_id: uuid::Uuid,
    id: uuid::Uuid,
) -> QueryResult<Vec<ScheduledTrack>> {
    diesel::delete(
        scheduled_track::table
            .filter(scheduled_track::id.eq(id))
            .filter(scheduled_track::station_id.eq(station_id)),
    )
    .returning(ScheduledTrack::as_returning())
    .get_results(conn)
    .await
}

/// ## Summary
/// Deletes every member of a group, optionally sparing one row, and returns the
/// deleted rows.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_by_group(
    conn: &mut AsyncPgConnection,
    station_id: uuid::Uuid,
    group_id: uuid::Uuid,
    keep: Option<uuid::Uuid>,
) -> QueryResult<Vec<ScheduledTrack>> {
    let target = scheduled_track::table
        .filter(scheduled_track::station_id.eq(station_id))
        .filter(scheduled_track::group_id.eq(group_id));

    if let Some(keep_id) = keep {
        diesel::delete(target.filter(scheduled_track::id.ne(keep_id)))
            .returning(ScheduledTrack::as_returning())
            .get_results(conn)
            .await
    } else {
        diesel::delete(target)
            .returning(ScheduledTrack::as_returning())
            .get_results(conn)
            .await
    }
}

/// ## Summary
/// Deletes every scheduled track of a station and returns the deleted rows.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_by_station(
    conn: &mut AsyncPgConnection,
    station_id: uuid::Uuid,
) -> QueryResult<Vec<ScheduledTrack>> {
    diesel::delete(scheduled_track::table.filter(scheduled_track::station_id.eq(station_id)))
        .returning(ScheduledTrack::as_returning())
        .get_results(conn)
        .await
}

/// ## Summary
/// Counts rows, across all stations, that still reference an artwork URL.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn count_by_artwork(conn: &mut AsyncPgConnection, artwork_url: &str) -> QueryResult<i64> {
    scheduled_track::table
        .filter(scheduled_track::artwork_url.eq(artwork_url))
        .count()
        .get_result(conn)
        .await
}
