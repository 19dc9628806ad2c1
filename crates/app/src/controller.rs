//! Wake-state controller — sole owner of presence-state transitions and
//! alarm scheduling decisions.
//!
//! The controller reacts to three external signals (manual toggle, alarm
//! sensor updates, the daily reset tick) and drives two outputs (the
//! presence entity and a single outstanding one-shot timer). It never
//! surfaces a parse failure to the host: every bad sensor value degrades
//! to "log and continue", because the surrounding automation process must
//! stay up.

use tracing::{debug, info, warn};

use wakemon_domain::alarm::{delay_until, parse_next_alarm};
use wakemon_domain::error::WakeMonError;
use wakemon_domain::event::WakeEvent;
use wakemon_domain::id::TimerId;
use wakemon_domain::presence::PresenceState;
use wakemon_domain::time;
use wakemon_domain::window::WakeWindow;

use crate::ports::{StateStore, TimerService};

/// Entity wiring and wake window for a controller instance.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Entity the derived presence state is written to.
    pub awake_state: String,
    /// Manually operated toggle mirroring "user is currently awake".
    pub ux_awake_state: String,
    /// Sensor holding the next scheduled alarm timestamp.
    pub next_alarm_sensor: String,
    /// Entity the accepted alarm time is published to (ISO-8601 text).
    pub next_wake_state: String,
    /// Hour range during which an alarm flips presence to awake.
    pub window: WakeWindow,
}

/// Tracks the user's wake/sleep state and schedules the wake alarm.
///
/// One instance per deployment; the host delivers events as discrete,
/// non-overlapping invocations, so no internal locking is needed. The
/// single `pending` field upholds the at-most-one-pending-timer
/// invariant: a newly accepted alarm always cancels the previous handle
/// before registering a new one.
pub struct WakeStateController<S, T> {
    config: ControllerConfig,
    store: S,
    timers: T,
    pending: Option<TimerId>,
}

impl<S, T> WakeStateController<S, T>
where
    S: StateStore,
    T: TimerService,
{
    /// Create a controller with no pending timer.
    pub fn new(config: ControllerConfig, store: S, timers: T) -> Self {
        Self {
            config,
            store,
            timers,
            pending: None,
        }
    }

    /// Pick up an alarm that was already set before the controller
    /// started.
    ///
    /// Reads the alarm sensor's current value and, when it holds
    /// anything, runs it through the normal update path so a
    /// pre-existing alarm takes effect without waiting for the next
    /// sensor update.
    ///
    /// # Errors
    ///
    /// Returns a store error from reading the sensor or publishing the
    /// accepted alarm time.
    pub async fn reconcile_startup(&mut self) -> Result<(), WakeMonError> {
        let current = self.store.get_state(&self.config.next_alarm_sensor).await?;
        match current {
            Some(value) => self.handle_alarm_changed(&value).await,
            None => {
                debug!(
                    sensor = %self.config.next_alarm_sensor,
                    "alarm sensor has no state yet"
                );
                Ok(())
            }
        }
    }

    /// Dispatch a single external event to the matching handler.
    ///
    /// State changes for entities other than the toggle and the alarm
    /// sensor are ignored.
    ///
    /// # Errors
    ///
    /// Returns a store error propagated from the underlying handler.
    pub async fn handle_event(&mut self, event: &WakeEvent) -> Result<(), WakeMonError> {
        match event {
            WakeEvent::StateChanged { entity, new, .. } => {
                if *entity == self.config.ux_awake_state {
                    self.handle_toggle_changed(new).await
                } else if *entity == self.config.next_alarm_sensor {
                    self.handle_alarm_changed(new).await
                } else {
                    Ok(())
                }
            }
            WakeEvent::AlarmFired { id } => self.handle_alarm_fired(*id).await,
            WakeEvent::DailyReset => self.handle_daily_reset().await,
        }
    }

    /// React to the manual toggle: `"on"` means awake, `"off"` asleep.
    ///
    /// Any other value is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns a store error from writing the presence entity.
    pub async fn handle_toggle_changed(&mut self, new: &str) -> Result<(), WakeMonError> {
        let Some(state) = PresenceState::from_toggle(new) else {
            debug!(value = new, "ignoring non-toggle value");
            return Ok(());
        };
        match state {
            PresenceState::Awake => info!("user is awake"),
            PresenceState::Sleep => info!("user is asleep"),
        }
        self.store
            .set_state(&self.config.awake_state, state.as_str())
            .await
    }

    /// React to an alarm-sensor update.
    ///
    /// Sentinel or unparseable values are logged and dropped. A valid
    /// timestamp outside the wake window is ignored *without* touching
    /// any pending timer. An in-window alarm replaces the pending timer
    /// (cancel before schedule) and publishes the accepted time.
    ///
    /// # Errors
    ///
    /// Returns a store error from publishing the accepted alarm time.
    /// Parse failures are never returned.
    pub async fn handle_alarm_changed(&mut self, raw: &str) -> Result<(), WakeMonError> {
        let alarm = match parse_next_alarm(raw) {
            Ok(Some(alarm)) => alarm,
            Ok(None) => {
                debug!(value = raw, "no alarm set");
                return Ok(());
            }
            Err(err) => {
                warn!(%err, "ignoring invalid alarm value");
                return Ok(());
            }
        };

        // Window check uses the alarm's own wall-clock time-of-day.
        if !self.config.window.contains(alarm.time()) {
            info!(
                alarm = %alarm.to_rfc3339(),
                window = %self.config.window,
                "alarm is outside the wake window, ignoring"
            );
            return Ok(());
        }

        // Cancel must complete before the new timer is registered so at
        // most one timer is ever pending.
        if let Some(previous) = self.pending.take() {
            self.timers.cancel(previous).await;
        }

        let delay = delay_until(&alarm, time::now());
        let id = self.timers.schedule_once(delay).await;
        self.pending = Some(id);

        self.store
            .set_state(&self.config.next_wake_state, &alarm.to_rfc3339())
            .await?;
        info!(
            seconds = delay.as_secs(),
            alarm = %alarm.to_rfc3339(),
            "scheduled wake alarm"
        );
        Ok(())
    }

    /// React to the scheduled wake timer firing.
    ///
    /// The handle has naturally expired, so it is only cleared, not
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Returns a store error from writing the presence entity or the
    /// toggle.
    pub async fn handle_alarm_fired(&mut self, _token: TimerId) -> Result<(), WakeMonError> {
        self.pending = None;
        info!("wake alarm fired");
        self.mark_awake().await
    }

    /// React to the daily reset deadline.
    ///
    /// A safety net in case neither the toggle nor an alarm fired. Any
    /// still-pending alarm timer is left alone; both triggers converge
    /// on the same idempotent awake state.
    ///
    /// # Errors
    ///
    /// Returns a store error from writing the presence entity or the
    /// toggle.
    pub async fn handle_daily_reset(&mut self) -> Result<(), WakeMonError> {
        info!("daily reset reached, forcing awake");
        self.mark_awake().await
    }

    /// Set presence to awake and keep the manual toggle mirror in sync.
    async fn mark_awake(&mut self) -> Result<(), WakeMonError> {
        self.store.turn_on(&self.config.ux_awake_state).await?;
        self.store
            .set_state(&self.config.awake_state, PresenceState::Awake.as_str())
            .await
    }
}
