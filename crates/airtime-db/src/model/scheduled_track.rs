use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// One scheduled play of a track on a station.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::scheduled_track)]
#[diesel(check_for_backend(Pg))]
pub struct ScheduledTrack {
    pub id: uuid::Uuid,
    pub station_id: uuid::Uuid,
    pub group_id: Option<uuid::Uuid>,
    pub track_id: String,
    pub artist_id: Option<String>,
    pub track_name: String,
    pub artist_name: String,
    pub track_view_url: Option<String>,
    pub artwork_url: Option<String>,
    /// Stored without a zone; read as UTC.
    pub date_scheduled: chrono::NaiveDateTime,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Insert struct for scheduling a new track
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::scheduled_track)]
pub struct NewScheduledTrack<'a> {
    pub station_id: uuid::Uuid,
    pub group_id: Option<uuid::Uuid>,
    pub track_id: &'a str,
    pub artist_id: Option<&'a str>,
    pub track_name: &'a str,
    pub artist_name: &'a str,
    pub track_view_url: Option<&'a str>,
    pub artwork_url: Option<&'a str>,
    pub date_scheduled: chrono::NaiveDateTime,
}

/// Full replacement of a scheduled track's mutable columns.
///
/// `None` values are written as `NULL`, so clearing an artwork or ungrouping a
/// row is expressed the same way as setting it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::scheduled_track)]
#[diesel(treat_none_as_null = true)]
pub struct ScheduledTrackChangeset<'a> {
    pub group_id: Option<uuid::Uuid>,
    pub track_id: &'a str,
    pub artist_id: Option<&'a str>,
    pub track_name: &'a str,
    pub artist_name: &'a str,
    pub track_view_url: Option<&'a str>,
    pub artwork_url: Option<&'a str>,
    pub date_scheduled: chrono::NaiveDateTime,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
