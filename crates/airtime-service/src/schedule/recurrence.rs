//! Expansion of a scheduling form into the dated occurrences of one series.
//!
//! ## Summary
//! A series is described by a start date-time, an inclusive end date and a day
//! filter. [`expand`] walks every calendar day between the two bounds, keeps the
//! days accepted by the filter and stamps each of them with the start's
//! time-of-day and one freshly generated [`GroupId`].
//!
//! Nothing here touches storage; callers persist the returned occurrences.

use std::collections::{BTreeSet, HashSet};
use std::iter::FusedIterator;

use airtime_core::types::{GroupId, RecurrenceMode};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

/// Inclusive range of calendar dates, yielded one day at a time.
///
/// A clone taken before iteration replays the same dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateRange {
    /// ## Summary
    /// Creates the range `start..=end`. Empty when `end` is before `start`.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }

    /// Number of dates left to yield.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.next.map_or(0, |next| {
            usize::try_from((self.end - next).num_days() + 1).unwrap_or(0)
        })
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|next| *next <= self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateRange {}
impl FusedIterator for DateRange {}

/// ## Summary
/// Returns true when `date` is the final day of its month.
#[must_use]
pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt()
        .is_none_or(|next| next.month() != date.month())
}

/// Recurrence settings of one scheduling request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceConfig {
    /// First candidate; its time-of-day is reused for every occurrence.
    pub start: NaiveDateTime,
    /// Inclusive last candidate date. `None` means the start date.
    pub end: Option<NaiveDate>,
    pub mode: RecurrenceMode,
    /// Weekdays accepted in daily mode. Empty accepts every day.
    pub weekdays: HashSet<Weekday>,
    /// Days of the month accepted in monthly mode.
    pub month_days: BTreeSet<u32>,
    /// In monthly mode, also accept the last day of every month.
    pub include_last_day_of_month: bool,
}

impl RecurrenceConfig {
    /// ## Summary
    /// A non-repeating config: one candidate day that always matches.
    #[must_use]
    pub fn single(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: None,
            mode: RecurrenceMode::Daily,
            weekdays: HashSet::new(),
            month_days: BTreeSet::new(),
            include_last_day_of_month: false,
        }
    }

    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end.unwrap_or_else(|| self.start.date())
    }

    /// Candidate dates from the start date to the end date inclusive.
    #[must_use]
    pub fn candidate_dates(&self) -> DateRange {
        DateRange::new(self.start.date(), self.end_date())
    }

    /// Number of calendar days the series spans; zero when the end precedes the start.
    #[must_use]
    pub fn span_days(&self) -> usize {
        self.candidate_dates().remaining()
    }

    /// ## Summary
    /// Applies the day filter of the configured mode to one candidate date.
    #[must_use]
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self.mode {
            RecurrenceMode::Daily => {
                self.weekdays.is_empty() || self.weekdays.contains(&date.weekday())
            }
            RecurrenceMode::Monthly => {
                self.month_days.contains(&date.day())
                    || (self.include_last_day_of_month && is_last_day_of_month(date))
            }
            RecurrenceMode::Unrecognized => false,
        }
    }
}

/// Track fields copied verbatim onto every occurrence of a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPayload {
    pub station_id: uuid::Uuid,
    pub track_id: String,
    pub artist_id: Option<String>,
    pub track_name: String,
    pub artist_name: String,
    pub track_view_url: Option<String>,
    pub artwork_url: Option<String>,
}

/// One dated entry produced by [`expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub group_id: GroupId,
    pub date_scheduled: NaiveDateTime,
    pub payload: TrackPayload,
}

/// Result of one expansion: the series identifier and its occurrences in
/// ascending order.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub group_id: GroupId,
    pub occurrences: Vec<Occurrence>,
}

impl Expansion {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }
}

/// ## Summary
/// Expands a recurrence config into the occurrences of a new series.
///
/// When `skip_first` is set the candidate equal to `config.start` is left out;
/// editing a series keeps the edited row and regenerates only the rest.
///
/// An empty result is valid: a filter that accepts no candidate, an end before
/// the start and an unrecognized mode all produce zero occurrences.
#[must_use]
pub fn expand(config: &RecurrenceConfig, payload: &TrackPayload, skip_first: bool) -> Expansion {
    let group_id = GroupId::generate();
    let time_of_day = config.start.time();

    let occurrences = config
        .candidate_dates()
        .filter(|date| config.matches(*date))
        .map(|date| date.and_time(time_of_day))
        .filter(|candidate| !(skip_first && *candidate == config.start))
        .map(|date_scheduled| Occurrence {
            group_id,
            date_scheduled,
            payload: payload.clone(),
        })
        .collect();

    Expansion {
        group_id,
        occurrences,
    }
}
