//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! Alarm parse failures are deliberately *not* part of [`WakeMonError`]:
//! they are always recovered locally by the controller (logged and
//! dropped), never propagated to the host.

/// Umbrella error for fallible controller and port operations.
#[derive(Debug, thiserror::Error)]
pub enum WakeMonError {
    /// A domain invariant was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The external state store rejected a read or write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A domain invariant failed (e.g. an inverted wake window).
#[derive(Debug, thiserror::Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    /// Which field or parameter failed validation.
    pub field: &'static str,
    /// Human-readable description of the failure.
    pub message: String,
}

/// The external state store failed for a given entity.
#[derive(Debug, thiserror::Error)]
#[error("state store failure for entity `{entity}`: {message}")]
pub struct StoreError {
    /// The entity id the operation targeted.
    pub entity: String,
    /// Human-readable description of the failure.
    pub message: String,
}
