//! In-process entity state store backed by a tokio broadcast channel.
//!
//! Stands in for the host platform's state machine: string-valued states
//! keyed by entity id, with every write broadcast as a
//! [`WakeEvent::StateChanged`] so the dispatch loop can react to it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use tokio::sync::broadcast;

use wakemon_app::ports::StateStore;
use wakemon_domain::error::WakeMonError;
use wakemon_domain::event::WakeEvent;

/// In-memory state store with change notification.
///
/// Publishing succeeds even when there are no active subscribers
/// (the change event is simply dropped).
pub struct InMemoryStateStore {
    states: Mutex<HashMap<String, String>>,
    sender: broadcast::Sender<WakeEvent>,
}

impl InMemoryStateStore {
    /// Create a new store with the given notification channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            states: Mutex::new(HashMap::new()),
            sender,
        }
    }

    /// Subscribe to state changes.
    ///
    /// Returns a receiver that will get all changes published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WakeEvent> {
        self.sender.subscribe()
    }

    fn write(&self, entity: &str, value: &str) {
        let old = self
            .states
            .lock()
            .expect("state map lock poisoned")
            .insert(entity.to_string(), value.to_string());
        // send fails only when there are zero receivers, which is fine.
        let _ = self.sender.send(WakeEvent::StateChanged {
            entity: entity.to_string(),
            old,
            new: value.to_string(),
        });
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new(64)
    }
}

impl StateStore for InMemoryStateStore {
    fn get_state(
        &self,
        entity: &str,
    ) -> impl Future<Output = Result<Option<String>, WakeMonError>> + Send {
        let value = self
            .states
            .lock()
            .expect("state map lock poisoned")
            .get(entity)
            .cloned();
        async { Ok(value) }
    }

    fn set_state(
        &self,
        entity: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), WakeMonError>> + Send {
        self.write(entity, value);
        async { Ok(()) }
    }

    fn turn_on(&self, entity: &str) -> impl Future<Output = Result<(), WakeMonError>> + Send {
        self.write(entity, "on");
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_return_none_for_unknown_entity() {
        let store = InMemoryStateStore::default();
        assert_eq!(store.get_state("sensor.missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn should_read_back_written_state() {
        let store = InMemoryStateStore::default();
        store.set_state("sensor.next_alarm", "unknown").await.unwrap();
        assert_eq!(
            store.get_state("sensor.next_alarm").await.unwrap().as_deref(),
            Some("unknown")
        );
    }

    #[tokio::test]
    async fn should_write_literal_on_when_turned_on() {
        let store = InMemoryStateStore::default();
        store.turn_on("input_boolean.toggle").await.unwrap();
        assert_eq!(
            store
                .get_state("input_boolean.toggle")
                .await
                .unwrap()
                .as_deref(),
            Some("on")
        );
    }

    #[tokio::test]
    async fn should_broadcast_change_to_subscriber() {
        let store = InMemoryStateStore::default();
        let mut rx = store.subscribe();

        store.set_state("sensor.next_alarm", "none").await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            WakeEvent::StateChanged {
                entity: "sensor.next_alarm".to_string(),
                old: None,
                new: "none".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn should_include_previous_value_in_change_event() {
        let store = InMemoryStateStore::default();
        store.set_state("input_boolean.toggle", "off").await.unwrap();

        let mut rx = store.subscribe();
        store.turn_on("input_boolean.toggle").await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            WakeEvent::StateChanged {
                entity: "input_boolean.toggle".to_string(),
                old: Some("off".to_string()),
                new: "on".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let store = InMemoryStateStore::default();
        let result = store.set_state("sensor.x", "1").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_deliver_changes_to_multiple_subscribers() {
        let store = InMemoryStateStore::default();
        let mut rx1 = store.subscribe();
        let mut rx2 = store.subscribe();

        store.set_state("sensor.x", "1").await.unwrap();

        assert_eq!(rx1.recv().await.unwrap(), rx2.recv().await.unwrap());
    }
}
