//! Calendar helpers
//!
//! All calendar math is done in UTC. Month numbers are 1-indexed everywhere
//! they appear in keys or queries; `month_index` is the only 0-indexed view.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Epoch seconds out of range: {0}")]
    EpochOutOfRange(i64),

    #[error("Unrecognised date format: {0}")]
    UnrecognisedDate(String),
}

/// A calendar month of a specific year
///
/// Deserialization goes through [`YearMonth::new`], so a month outside 1-12
/// is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = TemporalError;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        YearMonth::new(raw.year, raw.month)
    }
}

impl YearMonth {
    /// Creates a year/month, rejecting months outside 1-12
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The year/month a date-time falls in
    pub fn of(date: &DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current UTC year/month
    pub fn current() -> Self {
        Self::of(&Utc::now())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month, 1-12
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Zero-based month position, 0-11
    pub fn month_index(&self) -> usize {
        (self.month - 1) as usize
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Converts a date-time to whole epoch seconds, dropping sub-second precision
pub fn to_epoch_seconds(date: &DateTime<Utc>) -> i64 {
    date.timestamp()
}

/// Converts epoch seconds back to a UTC date-time
pub fn from_epoch_seconds(seconds: i64) -> Result<DateTime<Utc>, TemporalError> {
    DateTime::<Utc>::from_timestamp(seconds, 0).ok_or(TemporalError::EpochOutOfRange(seconds))
}

/// Truncates a date-time to whole seconds
pub fn truncate_to_seconds(date: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_opt(date.timestamp(), 0).single().unwrap_or(date)
}

/// Parses a date given as RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (taken as
/// UTC) or a bare `YYYY-MM-DD` (UTC midnight)
pub fn parse_flexible(raw: &str) -> Result<DateTime<Utc>, TemporalError> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(TemporalError::UnrecognisedDate(raw.to_string()))
}

/// Serde helper for optional date-time fields accepting [`parse_flexible`] formats
pub mod flexible_date_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_some(&date.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| super::parse_flexible(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
