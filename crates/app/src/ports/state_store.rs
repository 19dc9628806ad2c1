//! State store port — point-in-time reads and writes of named entities.

use std::future::Future;

use wakemon_domain::error::WakeMonError;

/// The host platform's entity state store.
///
/// Values are plain text: the store does not accept native datetimes or
/// enums, so callers serialize before writing.
pub trait StateStore {
    /// Read the current state of an entity, if the store knows it.
    fn get_state(
        &self,
        entity: &str,
    ) -> impl Future<Output = Result<Option<String>, WakeMonError>> + Send;

    /// Write a new state for an entity.
    fn set_state(
        &self,
        entity: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), WakeMonError>> + Send;

    /// Invoke the host's "turn on" action on a toggle entity.
    fn turn_on(&self, entity: &str) -> impl Future<Output = Result<(), WakeMonError>> + Send;
}

impl<T: StateStore + Send + Sync> StateStore for std::sync::Arc<T> {
    fn get_state(
        &self,
        entity: &str,
    ) -> impl Future<Output = Result<Option<String>, WakeMonError>> + Send {
        (**self).get_state(entity)
    }

    fn set_state(
        &self,
        entity: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), WakeMonError>> + Send {
        (**self).set_state(entity, value)
    }

    fn turn_on(&self, entity: &str) -> impl Future<Output = Result<(), WakeMonError>> + Send {
        (**self).turn_on(entity)
    }
}
