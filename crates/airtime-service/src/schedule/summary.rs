//! Per-day counts of a station's month, bucketed in the caller's local time.
//!
//! Scheduled times are stored as UTC wall-clock values. The dashboard shows a
//! month grid in the listener's time zone, so each time is shifted by the
//! caller's offset (or named zone) before it is assigned to a day.

use std::collections::BTreeMap;

use chrono::{Days, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{ServiceError, ServiceResult};

/// Largest UTC offset in use anywhere, in minutes.
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// How stored UTC times map to the caller's local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtcShift {
    /// Fixed offset, east of UTC.
    Offset(FixedOffset),
    /// IANA zone, honoring daylight saving transitions.
    Zone(Tz),
}

impl UtcShift {
    /// ## Summary
    /// Builds a fixed shift from minutes east of UTC (`60` for UTC+01:00).
    ///
    /// ## Errors
    /// Returns `ValidationError` if the offset exceeds ±14 hours.
    pub fn from_offset_minutes(minutes: i32) -> ServiceResult<Self> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ServiceError::ValidationError(format!(
                "offset {minutes} is outside ±{MAX_OFFSET_MINUTES} minutes"
            )));
        }

        FixedOffset::east_opt(minutes * 60)
            .map(Self::Offset)
            .ok_or_else(|| ServiceError::ValidationError(format!("invalid offset {minutes}")))
    }

    /// ## Summary
    /// Builds a shift from an IANA zone name such as `Europe/Berlin`.
    ///
    /// ## Errors
    /// Returns `ValidationError` if the zone is unknown.
    pub fn from_zone_name(name: &str) -> ServiceResult<Self> {
        name.trim()
            .parse::<Tz>()
            .map(Self::Zone)
            .map_err(|err| ServiceError::ValidationError(format!("unknown time zone '{name}': {err}")))
    }

    /// Converts a stored UTC wall-clock time to local wall-clock time.
    #[must_use]
    pub fn localize(&self, utc: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::Offset(offset) => offset.from_utc_datetime(&utc).naive_local(),
            Self::Zone(zone) => zone.from_utc_datetime(&utc).naive_local(),
        }
    }
}

/// One calendar month in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    first: NaiveDate,
    next: NaiveDate,
}

impl MonthWindow {
    /// ## Errors
    /// Returns `ValidationError` if the year/month pair is not a real month.
    pub fn new(year: i32, month: u32) -> ServiceResult<Self> {
        let invalid = || ServiceError::ValidationError(format!("invalid month {year}-{month}"));

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(invalid)?;

        Ok(Self { first, next })
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date < self.next
    }

    /// ## Summary
    /// UTC range to load so that any shift of up to one day is covered.
    ///
    /// Rows outside the local month are dropped again by [`summarize_month`].
    #[must_use]
    pub fn utc_bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        let from = self.first.checked_sub_days(Days::new(1)).unwrap_or(self.first);
        let until = self.next.checked_add_days(Days::new(1)).unwrap_or(self.next);
        (from.and_time(NaiveTime::MIN), until.and_time(NaiveTime::MIN))
    }
}

/// Number of plays scheduled on one local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub count: u64,
}

impl DaySummary {
    /// Calendar label such as `1 - Track` or `3 - Tracks`.
    #[must_use]
    pub fn title(&self) -> String {
        let plural = if self.count > 1 { "s" } else { "" };
        format!("{} - Track{plural}", self.count)
    }
}

/// ## Summary
/// Counts the given UTC times per local day of `window`, in date order.
///
/// Days without plays are omitted.
#[must_use]
pub fn summarize_month(
    window: &MonthWindow,
    shift: &UtcShift,
    scheduled: impl IntoIterator<Item = NaiveDateTime>,
) -> Vec<DaySummary> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for local in scheduled.into_iter().map(|utc| shift.localize(utc)) {
        if window.contains(local.date()) {
            *counts.entry(local.date()).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(date, count)| DaySummary { date, count })
        .collect()
}
