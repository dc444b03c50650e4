//! Parsing and validation of the scheduling form.

use std::collections::{BTreeSet, HashSet};

use airtime_core::types::RecurrenceMode;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer};

use crate::error::{ServiceError, ServiceResult};
use crate::schedule::recurrence::{RecurrenceConfig, TrackPayload};

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which rows a `PUT` on an occurrence rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateScope {
    /// Only the addressed occurrence; it leaves its series.
    #[default]
    Single,
    /// The addressed occurrence and the rest of its series.
    Series,
}

/// Scheduling form as submitted by the station dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleForm {
    #[serde(deserialize_with = "string_or_number")]
    pub track_id: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub artist_id: Option<String>,
    pub track_name: String,
    pub artist_name: String,
    #[serde(default)]
    pub track_view_url: Option<String>,
    #[serde(default, alias = "artworkURL")]
    pub artwork_url: Option<String>,
    pub date_scheduled: String,

    /// Enables the recurrence fields below. When unset the form schedules one play.
    #[serde(default)]
    pub repeat: bool,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    /// Weekday names for daily mode.
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default)]
    pub month_days: Vec<u32>,
    #[serde(default)]
    pub include_last_day_of_month: bool,

    #[serde(default)]
    pub scope: UpdateScope,
}

/// A validated form, ready for expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub config: RecurrenceConfig,
    pub payload: TrackPayload,
}

impl ScheduleForm {
    /// ## Summary
    /// Validates the form for `station_id`.
    ///
    /// ## Errors
    /// Returns `ValidationError` if a required field is blank, a date cannot be
    /// parsed, a weekday name is unknown or a day-of-month is outside `1..=31`.
    pub fn validate(&self, station_id: uuid::Uuid) -> ServiceResult<ScheduleRequest> {
        let payload = TrackPayload {
            station_id,
            track_id: required("trackId", &self.track_id)?,
            artist_id: optional(self.artist_id.as_deref()),
            track_name: required("trackName", &self.track_name)?,
            artist_name: required("artistName", &self.artist_name)?,
            track_view_url: optional(self.track_view_url.as_deref()),
            artwork_url: optional(self.artwork_url.as_deref()),
        };

        let start = parse_schedule_datetime(&self.date_scheduled)?;

        let config = if self.repeat {
            RecurrenceConfig {
                start,
                end: self
                    .end_date
                    .as_deref()
                    .filter(|value| !value.trim().is_empty())
                    .map(parse_schedule_date)
                    .transpose()?,
                mode: RecurrenceMode::parse(self.mode.as_deref()),
                weekdays: parse_weekdays(&self.days)?,
                month_days: parse_month_days(&self.month_days)?,
                include_last_day_of_month: self.include_last_day_of_month,
            }
        } else {
            RecurrenceConfig::single(start)
        };

        Ok(ScheduleRequest { config, payload })
    }
}

fn required(field: &str, value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::ValidationError(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// ## Summary
/// Parses a scheduled date-time.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]` with either `T` or a space as
/// separator, RFC 3339 timestamps (converted to UTC) and bare dates, which
/// mean midnight.
///
/// ## Errors
/// Returns `ValidationError` if no accepted format matches.
pub fn parse_schedule_datetime(value: &str) -> ServiceResult<NaiveDateTime> {
    let value = value.trim();

    if let Some(parsed) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Ok(parsed);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_utc());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|err| ServiceError::ValidationError(format!("invalid date '{value}': {err}")))
}

/// ## Summary
/// Parses a calendar date, also accepting any form [`parse_schedule_datetime`] does.
///
/// ## Errors
/// Returns `ValidationError` if the value is not a date.
pub fn parse_schedule_date(value: &str) -> ServiceResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .or_else(|_err| parse_schedule_datetime(value).map(|dt| dt.date()))
}

fn parse_weekdays(names: &[String]) -> ServiceResult<HashSet<Weekday>> {
    names
        .iter()
        .map(|name| {
            name.trim()
                .parse::<Weekday>()
                .map_err(|_err| ServiceError::ValidationError(format!("unknown weekday '{name}'")))
        })
        .collect()
}

fn parse_month_days(days: &[u32]) -> ServiceResult<BTreeSet<u32>> {
    days.iter()
        .map(|&day| {
            if (1..=31).contains(&day) {
                Ok(day)
            } else {
                Err(ServiceError::ValidationError(format!(
                    "day of month {day} is outside 1..=31"
                )))
            }
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Integer(n) => n.to_string(),
        }
    }
}

/// Catalog ids arrive as JSON numbers from some clients.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|value| value.map(String::from))
}
