//! Tokio implementation of the timer port.
//!
//! One-shot timers are spawned tasks that sleep for the requested delay
//! and then report back through the dispatch channel as
//! [`WakeEvent::AlarmFired`]. Handles are tracked so cancellation can
//! abort the task; cancelling an already-fired or unknown handle is a
//! no-op. A separate recurring task delivers [`WakeEvent::DailyReset`]
//! at a fixed wall-clock time every day.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveTime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use wakemon_app::ports::TimerService;
use wakemon_domain::event::WakeEvent;
use wakemon_domain::id::TimerId;
use wakemon_domain::time::{now, until_next_daily};

/// Cancellable one-shot timers backed by spawned tokio tasks.
pub struct TokioTimerService {
    tx: mpsc::UnboundedSender<WakeEvent>,
    tasks: Arc<Mutex<HashMap<TimerId, JoinHandle<()>>>>,
}

impl TokioTimerService {
    /// Create a timer service reporting fires on `tx`.
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<WakeEvent>) -> Self {
        Self {
            tx,
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of timers currently pending.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.tasks.lock().expect("timer map lock poisoned").len()
    }
}

impl TimerService for TokioTimerService {
    fn schedule_once(&self, delay: Duration) -> impl Future<Output = TimerId> + Send {
        let id = TimerId::new();
        let tx = self.tx.clone();
        let tasks = Arc::clone(&self.tasks);

        // Hold the lock across spawn + insert so the task's self-removal
        // (which takes the same lock) cannot run before the insert.
        let mut map = self.tasks.lock().expect("timer map lock poisoned");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tasks.lock().expect("timer map lock poisoned").remove(&id);
            // send fails only when the dispatch loop is gone; nothing
            // left to wake in that case.
            let _ = tx.send(WakeEvent::AlarmFired { id });
        });
        map.insert(id, handle);
        drop(map);

        async move { id }
    }

    fn cancel(&self, id: TimerId) -> impl Future<Output = ()> + Send {
        match self
            .tasks
            .lock()
            .expect("timer map lock poisoned")
            .remove(&id)
        {
            Some(handle) => handle.abort(),
            None => debug!(%id, "cancel for unknown or already-fired timer, ignoring"),
        }
        async {}
    }
}

/// Spawn the daily reset task.
///
/// Sleeps until the next occurrence of `time_of_day` (UTC), sends
/// [`WakeEvent::DailyReset`], and repeats. Stops when the receiving end
/// of `tx` is dropped.
pub fn spawn_daily(tx: mpsc::UnboundedSender<WakeEvent>, time_of_day: NaiveTime) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let wait = until_next_daily(time_of_day, now())
                .to_std()
                .unwrap_or_default();
            tokio::time::sleep(wait).await;
            if tx.send(WakeEvent::DailyReset).is_err() {
                break;
            }
            // Step past the reset instant so the next iteration targets
            // tomorrow instead of re-firing within the same second.
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    })
}
