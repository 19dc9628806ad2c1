//! Presence state — the published awake/sleep status.

use serde::{Deserialize, Serialize};

/// Derived wake/sleep status published for downstream automations.
///
/// Only the controller writes this state. Its initial value is whatever
/// the external store already holds; the controller never initializes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceState {
    Awake,
    Sleep,
}

impl PresenceState {
    /// Map a manual toggle value onto a presence state.
    ///
    /// `"on"` means the user is awake, `"off"` asleep. Anything else is
    /// not a toggle value and yields `None` (the caller ignores it).
    #[must_use]
    pub fn from_toggle(value: &str) -> Option<Self> {
        match value {
            "on" => Some(Self::Awake),
            "off" => Some(Self::Sleep),
            _ => None,
        }
    }

    /// The textual form the external store accepts.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Awake => "awake",
            Self::Sleep => "sleep",
        }
    }
}

impl std::fmt::Display for PresenceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
