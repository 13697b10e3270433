//! Whole-day calendar arithmetic used by itinerary planning.
//!
//! Dates never carry a time of day or a zone; values coming from clients as
//! RFC 3339 timestamps are truncated to their date part.

use chrono::{DateTime, Duration, NaiveDate};
use thiserror::Error;

pub const MISSING_DATE: &str = "N/A";
const DISPLAY_FORMAT: &str = "%b %-d, %Y";
const ISO_FORMAT: &str = "%Y-%m-%d";
// beyond this `Duration::days` itself overflows
const MAX_SHIFT_DAYS: i64 = i64::MAX / 86_400_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{input}` is not a calendar date")]
pub struct ParseDateError {
    pub input: String,
}

/// `Jan 5, 2025`, or `N/A` when there is no date.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => MISSING_DATE.to_owned(),
    }
}

/// Formats raw text when it parses; otherwise hands the text back untouched.
pub fn format_optional_text(text: Option<&str>) -> String {
    match text.map(str::trim) {
        None | Some("") => MISSING_DATE.to_owned(),
        Some(text) => parse_date(text)
            .map(|date| format_date(Some(date)))
            .unwrap_or_else(|_| text.to_owned()),
    }
}

pub fn parse_date(text: &str) -> Result<NaiveDate, ParseDateError> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, ISO_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(text)
        .map(|date_time| date_time.date_naive())
        .map_err(|_| ParseDateError {
            input: text.to_owned(),
        })
}

pub fn to_iso_string(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Shifts `date` by `days`, saturating at the bounds chrono can represent.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days.clamp(-MAX_SHIFT_DAYS, MAX_SHIFT_DAYS)))
        .unwrap_or(if days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
