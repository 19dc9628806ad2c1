//! Time and timestamp helpers.

use chrono::{DateTime, Duration, NaiveTime, Utc};

/// UTC timestamp used for event times and delay computations.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Duration from `now` until the next occurrence of `time_of_day`.
///
/// If today's occurrence is still ahead (or exactly now), it is used;
/// otherwise tomorrow's. The result is therefore in `[0, 24h)`.
#[must_use]
pub fn until_next_daily(time_of_day: NaiveTime, now: Timestamp) -> Duration {
    let today = now.date_naive().and_time(time_of_day).and_utc();
    if today >= now {
        today - now
    } else {
        today + Duration::days(1) - now
    }
}
