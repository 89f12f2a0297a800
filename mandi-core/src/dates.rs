//! Date helpers for ISO-8601 strings stored in the document store.

use chrono::{DateTime, NaiveDate};

/// Calendar date format used for stored dates and `dateFrom` filters.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Format a NaiveDate as "YYYY-MM-DD"
pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Parse the calendar date out of an ISO-8601 string.
///
/// Accepts plain dates (`2024-10-05`), RFC 3339 timestamps
/// (`2024-10-05T04:30:00.000Z`) and anything whose first ten characters
/// form a plain date.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
        return Some(timestamp.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, ISO_DATE) {
        return Some(date);
    }
    s.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, ISO_DATE).ok())
}

/// Short day/month axis label in the en-IN style, e.g. "5 Oct".
pub fn day_month_label(date: &NaiveDate) -> String {
    date.format("%-d %b").to_string()
}
