//! Event dates and the "today" cutoff.
//!
//! Upcoming and search listings compare event dates against the start of the
//! current day, computed from wall-clock time when the listing runs. The day
//! boundary is midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Truncate a timestamp to midnight of the same UTC day.
pub fn start_of_day(at: Timestamp) -> Timestamp {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Midnight UTC of the current day.
pub fn start_of_today() -> Timestamp {
    start_of_day(Utc::now())
}

/// Whether an event belongs in the upcoming listing: dated on or after the
/// cutoff.
pub fn is_upcoming(date: Timestamp, cutoff: Timestamp) -> bool {
    date >= cutoff
}

/// Whether an event is eligible for search: dated strictly after the cutoff.
///
/// An event at exactly midnight today is upcoming but not searchable.
pub fn is_searchable(date: Timestamp, cutoff: Timestamp) -> bool {
    date > cutoff
}

/// Parse an incoming `eventDate` into a comparable timestamp.
///
/// Accepts an RFC 3339 timestamp (any offset, normalized to UTC) or a bare
/// `YYYY-MM-DD` date, which is taken as midnight UTC.
///
/// # Examples
///
/// ```
/// use actify_core::schedule::parse_event_date;
/// let a = parse_event_date("2026-03-01").unwrap();
/// let b = parse_event_date("2026-03-01T00:00:00Z").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_event_date("next tuesday").is_err());
/// ```
pub fn parse_event_date(raw: &str) -> Result<Timestamp, CoreError> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| {
            CoreError::Validation(format!(
                "eventDate '{raw}' must be an RFC 3339 timestamp or YYYY-MM-DD date"
            ))
        })
}
