//! # wakemon-domain
//!
//! Pure domain model for the wakemon presence monitor.
//!
//! ## Responsibilities
//! - Foundational types: timer identifiers, error conventions, timestamps
//! - Define **`PresenceState`** (the published awake/sleep status)
//! - Define **alarm parsing** (permissive ISO-8601 with no-alarm sentinels)
//! - Define the **`WakeWindow`** (inclusive hour range for accepted alarms)
//! - Define **`WakeEvent`** (the vocabulary delivered to the dispatch loop)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod alarm;
pub mod error;
pub mod event;
pub mod id;
pub mod presence;
pub mod time;
pub mod window;
