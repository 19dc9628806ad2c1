//! # wakemon-app
//!
//! Application layer — the wake-state controller and **port definitions**
//! (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound
//!   ports):
//!   - `StateStore` — read/write entity states, turn the toggle on
//!   - `TimerService` — cancellable one-shot timers
//! - Provide the **`WakeStateController`** — sole owner of presence-state
//!   transitions and alarm scheduling decisions
//! - Orchestrate domain objects without knowing *how* scheduling or
//!   storage works
//!
//! ## Dependency rule
//! Depends on `wakemon-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod controller;
pub mod ports;
