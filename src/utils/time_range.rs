//! Time window resolution for statistics queries.
//!
//! Statistics requests may supply one, both, or neither of the `since`/`until`
//! bounds. [`fulfill_time_range`] reconciles the missing bounds against a maximum
//! window span, and [`validate_time_range`] rejects inverted or over-wide windows
//! with a human-readable error. The resolved window feeds a cache key, so the
//! rules are deterministic for identical inputs.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// A fully resolved `[since, until]` statistics window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

/// Maximum allowed window span.
///
/// `Unbounded` disables the span check and makes a missing `since` default to
/// the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxDuration {
    Finite(Duration),
    Unbounded,
}

impl MaxDuration {
    pub fn days(days: i64) -> Self {
        Self::Finite(Duration::days(days))
    }
}

/// Errors from time window validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeRangeError {
    #[error("Invalid 'since' or 'until' date provided")]
    InvalidBounds,
    #[error("'until' must be after 'since'")]
    EmptyWindow,
    #[error("The difference between 'since' and 'until' must be less than {0}")]
    WindowTooWide(String),
}

/// Infers missing window bounds.
///
/// - Both bounds given: used as-is.
/// - Only `since`: `until = since + max` for a finite maximum, otherwise `now`.
/// - Only `until`, or neither: `since = until - max` for a finite maximum,
///   otherwise the epoch; a missing `until` defaults to `now`.
pub fn fulfill_time_range(
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
    max: MaxDuration,
) -> TimeWindow {
    let until_fulfilled = match (until, since, max) {
        (Some(u), _, _) => u,
        (None, Some(s), MaxDuration::Finite(d)) => s + d,
        (None, _, _) => Utc::now(),
    };

    let since_fulfilled = match (since, max) {
        (Some(s), _) => s,
        (None, MaxDuration::Finite(d)) => until_fulfilled - d,
        (None, MaxDuration::Unbounded) => Utc.timestamp_opt(0, 0).single().unwrap_or_default(),
    };

    TimeWindow {
        since: since_fulfilled,
        until: until_fulfilled,
    }
}

/// Validates that a window is non-empty and within the maximum span.
///
/// The span check is skipped for [`MaxDuration::Unbounded`].
pub fn validate_time_range(
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    max: MaxDuration,
) -> Result<TimeWindow, TimeRangeError> {
    if until <= since {
        return Err(TimeRangeError::EmptyWindow);
    }

    if let MaxDuration::Finite(d) = max
        && until - since > d
    {
        return Err(TimeRangeError::WindowTooWide(humanize(d)));
    }

    Ok(TimeWindow { since, until })
}

/// Parses a query-string instant: RFC 3339 first, then a bare `YYYY-MM-DD` date
/// interpreted as midnight UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&t));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| Utc.from_utc_datetime(&t))
}

/// Truncates an instant to minute granularity for cache keying, so requests
/// within the same minute share an entry.
pub fn minute_bucket(t: DateTime<Utc>) -> i64 {
    t.timestamp().div_euclid(60)
}

fn humanize(d: Duration) -> String {
    if d.num_days() > 0 {
        format!("{} days", d.num_days())
    } else if d.num_hours() > 0 {
        format!("{} hours", d.num_hours())
    } else {
        format!("{} seconds", d.num_seconds())
    }
}
