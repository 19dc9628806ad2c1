//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the host
//! platform. They are defined here (in `app`) so that both the controller
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod state_store;
pub mod timer;

pub use state_store::StateStore;
pub use timer::TimerService;
