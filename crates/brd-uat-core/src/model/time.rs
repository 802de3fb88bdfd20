// brd-uat-core/src/model/time.rs
// ============================================================================
// Module: Calendar Helpers
// Description: Date parsing and formatting for requirement records.
// Purpose: Keep one canonical textual form for stored and rendered dates.
// Dependencies: time, serde
// ============================================================================

//! ## Overview
//! Delivery dates are stored as `YYYY-MM-DD` and rendered in documents as
//! `Month D, YYYY`. Renderers never read the wall clock; callers pass the
//! generation date explicitly so output is reproducible in tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use time::Date;
use time::Month;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Formatting
// ============================================================================

/// Parses a strict `YYYY-MM-DD` calendar date.
#[must_use]
pub fn parse_iso_date(value: &str) -> Option<Date> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !bytes.iter().enumerate().all(|(idx, byte)| idx == 4 || idx == 7 || byte.is_ascii_digit()) {
        return None;
    }
    let year: i32 = value.get(0..4)?.parse().ok()?;
    let month: u8 = value.get(5..7)?.parse().ok()?;
    let day: u8 = value.get(8..10)?.parse().ok()?;
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// Formats a date as `Month D, YYYY` (for example `March 5, 2026`).
#[must_use]
pub fn format_long_date(date: Date) -> String {
    format!("{} {}, {}", date.month(), date.day(), date.year())
}

/// Returns today's date in UTC.
#[must_use]
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Returns the current unix epoch in milliseconds.
#[must_use]
pub fn unix_millis() -> i64 {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    i64::try_from(now.as_millis()).unwrap_or(i64::MAX)
}

/// Returns the current unix epoch in whole seconds.
#[must_use]
pub fn unix_seconds() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs()
}

// ============================================================================
// SECTION: Serde Adapters
// ============================================================================

/// Serde adapter for optional `YYYY-MM-DD` dates.
pub mod optional_iso_date {
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;
    use time::Date;

    use super::format_iso_date;
    use super::parse_iso_date;

    /// Serializes an optional date as a `YYYY-MM-DD` string or null.
    ///
    /// # Errors
    ///
    /// Returns the serializer error when writing fails.
    #[allow(clippy::ref_option, reason = "Serde `with` adapters receive `&Option<T>`.")]
    pub fn serialize<S: Serializer>(value: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&format_iso_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns a custom error when the string is not a valid date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => parse_iso_date(text.trim())
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {text}"))),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
