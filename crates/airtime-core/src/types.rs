use serde::{Deserialize, Serialize};

/// How a series picks its days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurrenceMode {
    /// Filter candidate days by weekday.
    Daily,
    /// Filter candidate days by day-of-month, optionally including the last day.
    Monthly,
    /// Missing or unknown mode. Matches no candidate day.
    Unrecognized,
}

impl RecurrenceMode {
    /// ## Summary
    /// Parses a mode as submitted by the scheduling form.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. Anything
    /// other than `daily` or `monthly` becomes [`RecurrenceMode::Unrecognized`].
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(mode) if mode.eq_ignore_ascii_case("daily") => Self::Daily,
            Some(mode) if mode.eq_ignore_ascii_case("monthly") => Self::Monthly,
            _ => Self::Unrecognized,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for RecurrenceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque identifier shared by every occurrence of one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(uuid::Uuid);

impl GroupId {
    /// ## Summary
    /// Generates a fresh random (v4) group identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(id: uuid::Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_uuid(self) -> uuid::Uuid {
        self.0
    }
}

impl From<uuid::Uuid> for GroupId {
    fn from(id: uuid::Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
