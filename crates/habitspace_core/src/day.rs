//! Canonical calendar-day representation.
//!
//! # Responsibility
//! - Produce the stable `YYYY-MM-DD` day string used for check-ins.
//! - Keep day comparison independent of locale formatting.
//!
//! # Invariants
//! - One string per distinct device-local calendar day.
//! - Format is fixed; persisted day strings stay comparable across locales
//!   and app versions.

use chrono::{Local, NaiveDate};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Returns the canonical day string for the current device-local date.
pub fn today_string() -> String {
    canonical_day(Local::now().date_naive())
}

/// Formats a date as a canonical day string.
pub fn canonical_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Returns whether `value` is a well-formed canonical day string.
///
/// Parsing alone is too lenient (it accepts unpadded fields); the value must
/// also round-trip to itself.
pub fn is_canonical_day(value: &str) -> bool {
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .map(|date| canonical_day(date) == value)
        .unwrap_or(false)
}
