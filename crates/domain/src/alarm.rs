//! Alarm timestamp parsing — permissive ISO-8601 with no-alarm sentinels.
//!
//! Alarm sensors report their next alarm as text and are not consistent
//! about it: the offset may be missing, `Z` may stand in for `+00:00`,
//! fractional seconds come and go, and "no alarm set" arrives as an empty
//! string or one of a few sentinel words.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::time::Timestamp;

/// Case-insensitive sensor values meaning "no alarm is set".
pub const NO_ALARM_SENTINELS: [&str; 3] = ["unknown", "unavailable", "none"];

/// The sensor value could not be parsed as a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unparseable alarm timestamp: {raw:?}")]
pub struct AlarmParseError {
    /// The raw sensor value, as received.
    pub raw: String,
}

/// Parse a raw alarm-sensor value.
///
/// Returns `Ok(None)` for an empty value or a recognized no-alarm
/// sentinel. A trailing `Z` (or `z`) is treated as `+00:00`, and a
/// timestamp without any offset is interpreted as UTC. The parsed value
/// keeps its own offset so callers can reason about the alarm's
/// wall-clock time-of-day.
///
/// # Errors
///
/// Returns [`AlarmParseError`] when the value is neither a sentinel nor
/// a parseable ISO-8601 timestamp.
pub fn parse_next_alarm(raw: &str) -> Result<Option<DateTime<FixedOffset>>, AlarmParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_no_alarm_sentinel(trimmed) {
        return Ok(None);
    }

    let normalized = trimmed
        .strip_suffix(['Z', 'z'])
        .map_or_else(|| trimmed.to_string(), |rest| format!("{rest}+00:00"));

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(Some(parsed));
    }

    // No offset at all: assume UTC. `%.f` tolerates optional fractional
    // seconds.
    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(naive.and_utc().fixed_offset()));
    }

    Err(AlarmParseError {
        raw: raw.to_string(),
    })
}

/// Whether the value is a recognized "no alarm" sentinel.
#[must_use]
pub fn is_no_alarm_sentinel(value: &str) -> bool {
    NO_ALARM_SENTINELS
        .iter()
        .any(|sentinel| value.eq_ignore_ascii_case(sentinel))
}

/// Whole seconds from `now` until the alarm instant, clamped to zero.
///
/// An alarm at or before `now` yields a zero delay: the timer fires
/// immediately rather than being scheduled in the past.
#[must_use]
pub fn delay_until(alarm: &DateTime<FixedOffset>, now: Timestamp) -> Duration {
    let seconds = (alarm.with_timezone(&Utc) - now).num_seconds();
    Duration::from_secs(u64::try_from(seconds).unwrap_or(0))
}
