//! Wake events — the vocabulary delivered to the dispatch loop.
//!
//! The host platform (or its in-process stand-ins) reduces everything the
//! controller can react to into this enum: entity state changes, one-shot
//! timer fires, and the daily reset tick.

use serde::{Deserialize, Serialize};

use crate::id::TimerId;

/// A single external signal for the controller to handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WakeEvent {
    /// A watched entity changed state.
    StateChanged {
        /// Entity id (e.g. `input_boolean.ux_awake_state`).
        entity: String,
        /// Previous value, when the store had one.
        old: Option<String>,
        /// New value.
        new: String,
    },
    /// A scheduled one-shot wake timer fired.
    AlarmFired {
        /// Handle of the timer that fired.
        id: TimerId,
    },
    /// The daily reset deadline was reached.
    DailyReset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_serde_json() {
        let events = vec![
            WakeEvent::StateChanged {
                entity: "sensor.next_alarm".to_string(),
                old: None,
                new: "2024-01-15T06:30:00+00:00".to_string(),
            },
            WakeEvent::AlarmFired { id: TimerId::new() },
            WakeEvent::DailyReset,
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let parsed: WakeEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(&parsed, event);
        }
    }

    #[test]
    fn should_tag_variants_in_snake_case() {
        let json = serde_json::to_string(&WakeEvent::DailyReset).unwrap();
        assert_eq!(json, "{\"type\":\"daily_reset\"}");
    }
}
