//! Wake window — the inclusive hour range during which an alarm counts.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Inclusive `[start:00, end:00]` hour range within a single day.
///
/// An alarm whose wall-clock time-of-day falls inside the window is the
/// one that should flip presence to awake; anything else is ignored.
/// Overnight wrap (`start > end`) is not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeWindow {
    start_hour: u32,
    end_hour: u32,
}

impl WakeWindow {
    /// Build a window from start/end hours of day.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when either hour exceeds 23 or the
    /// start hour is after the end hour.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, ValidationError> {
        if start_hour > 23 || end_hour > 23 {
            return Err(ValidationError {
                field: "wake_window",
                message: format!("hours must be 0-23, got {start_hour}..{end_hour}"),
            });
        }
        if start_hour > end_hour {
            return Err(ValidationError {
                field: "wake_window",
                message: format!(
                    "start hour {start_hour} must not be after end hour {end_hour}"
                ),
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    /// Whether a wall-clock time-of-day falls inside the window,
    /// inclusive on both ends.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        // Hours are validated in `new`, so these cannot fail.
        let Some(start) = NaiveTime::from_hms_opt(self.start_hour, 0, 0) else {
            return false;
        };
        let Some(end) = NaiveTime::from_hms_opt(self.end_hour, 0, 0) else {
            return false;
        };
        start <= time && time <= end
    }

    /// Start hour of day (0-23).
    #[must_use]
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// End hour of day (0-23).
    #[must_use]
    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }
}

impl std::fmt::Display for WakeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:02}:00, {:02}:00]", self.start_hour, self.end_hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn should_accept_time_inside_window() {
        let window = WakeWindow::new(4, 9).unwrap();
        assert!(window.contains(t(7, 30, 0)));
    }

    #[test]
    fn should_reject_time_after_window() {
        let window = WakeWindow::new(4, 9).unwrap();
        assert!(!window.contains(t(10, 0, 0)));
    }

    #[test]
    fn should_reject_time_before_window() {
        let window = WakeWindow::new(4, 9).unwrap();
        assert!(!window.contains(t(3, 59, 59)));
    }

    #[test]
    fn should_include_both_boundaries() {
        let window = WakeWindow::new(4, 9).unwrap();
        assert!(window.contains(t(4, 0, 0)));
        assert!(window.contains(t(9, 0, 0)));
    }

    #[test]
    fn should_reject_one_second_past_end_boundary() {
        let window = WakeWindow::new(4, 9).unwrap();
        assert!(!window.contains(t(9, 0, 1)));
    }

    #[test]
    fn should_allow_single_hour_window() {
        let window = WakeWindow::new(6, 6).unwrap();
        assert!(window.contains(t(6, 0, 0)));
        assert!(!window.contains(t(6, 0, 1)));
    }

    #[test]
    fn should_reject_inverted_window() {
        assert!(WakeWindow::new(9, 4).is_err());
    }

    #[test]
    fn should_reject_out_of_range_hours() {
        assert!(WakeWindow::new(24, 25).is_err());
        assert!(WakeWindow::new(0, 24).is_err());
    }

    #[test]
    fn should_display_window_as_time_range() {
        let window = WakeWindow::new(4, 9).unwrap();
        assert_eq!(window.to_string(), "[04:00, 09:00]");
    }
}
