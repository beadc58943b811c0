//! # Timestamp Handling
//!
//! Ledger rows carry a naive local timestamp. Two formats exist in the wild:
//!
//! - legacy rows: `DD/MM/YYYY HH:MM` (written by an earlier tool)
//! - current rows: `YYYY-MM-DD HH:MM:SS`
//!
//! The reader accepts both, trying the legacy format first and falling back
//! to the current one. All new writes use the current format only, so legacy
//! rows age out of the file as it gets rewritten.

use chrono::{Datelike, NaiveDateTime};
use thiserror::Error;

/// Format every new write uses.
pub const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format accepted for rows written by the legacy tool.
pub const LEGACY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A timestamp string that matches neither accepted format.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unrecognized timestamp: '{0}'")]
pub struct TimestampParseError(pub String);

/// Parses a ledger timestamp, accepting both formats.
///
/// ## Example
/// ```rust
/// use tillbook_core::timestamp::parse_timestamp;
///
/// let legacy = parse_timestamp("2/4/2025 10:33").unwrap();
/// let current = parse_timestamp("2025-04-02 10:33:00").unwrap();
/// assert_eq!(legacy, current);
/// ```
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, TimestampParseError> {
    NaiveDateTime::parse_from_str(text, LEGACY_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, WRITE_FORMAT))
        .map_err(|_| TimestampParseError(text.to_string()))
}

/// Formats a timestamp in the current write format.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(WRITE_FORMAT).to_string()
}

// =============================================================================
// Serde Helpers
// =============================================================================

/// Serde adapter for timestamp columns: writes the current format, reads both.
///
/// Use as `#[serde(with = "tillbook_core::timestamp::serde_fmt")]`.
pub mod serde_fmt {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        ts: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_timestamp(&text).map_err(de::Error::custom)
    }
}

// =============================================================================
// Date Filter
// =============================================================================

/// A partial date used to filter transaction history.
///
/// Unset components match everything, so the default filter matches every
/// record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl DateFilter {
    /// A filter that matches every record.
    pub const fn all() -> Self {
        DateFilter {
            year: None,
            month: None,
            day: None,
        }
    }

    pub const fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub const fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub const fn day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    /// Checks whether a timestamp matches all set components.
    pub fn matches(&self, ts: NaiveDateTime) -> bool {
        self.year.map_or(true, |y| ts.year() == y)
            && self.month.map_or(true, |m| ts.month() == m)
            && self.day.map_or(true, |d| ts.day() == d)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
