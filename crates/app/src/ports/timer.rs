//! Timer port — cancellable one-shot delayed callbacks.

use std::future::Future;
use std::time::Duration;

use wakemon_domain::id::TimerId;

/// The host platform's one-shot timer facility.
///
/// How a fire is delivered back to the controller is the adapter's
/// business (wakemond routes it through the event channel as
/// [`WakeEvent::AlarmFired`](wakemon_domain::event::WakeEvent)).
pub trait TimerService {
    /// Schedule a one-shot timer after `delay`, returning its handle.
    fn schedule_once(&self, delay: Duration) -> impl Future<Output = TimerId> + Send;

    /// Cancel a pending timer.
    ///
    /// Cancelling an already-fired or unknown handle is a successful
    /// no-op, never a failure.
    fn cancel(&self, id: TimerId) -> impl Future<Output = ()> + Send;
}

impl<T: TimerService + Send + Sync> TimerService for std::sync::Arc<T> {
    fn schedule_once(&self, delay: Duration) -> impl Future<Output = TimerId> + Send {
        (**self).schedule_once(delay)
    }

    fn cancel(&self, id: TimerId) -> impl Future<Output = ()> + Send {
        (**self).cancel(id)
    }
}
