//! # wakemond — wakemon daemon
//!
//! Composition root that wires the store, timers and controller together
//! and runs the single-threaded dispatch loop.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Construct the state store and timer service (adapters)
//! - Construct the controller, injecting adapters via port traits
//! - Run startup reconciliation and the daily reset task
//! - Deliver events to the controller one at a time; a handler failure
//!   is logged, never fatal
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wakemon_adapter_store_memory::InMemoryStateStore;
use wakemon_adapter_timer_tokio::{TokioTimerService, spawn_daily};
use wakemon_app::controller::{ControllerConfig, WakeStateController};
use wakemon_domain::event::WakeEvent;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let window = config.wake_window()?;
    let reset_time = config.reset_time()?;

    let store = Arc::new(InMemoryStateStore::new(64));
    let (tx, mut rx) = mpsc::unbounded_channel::<WakeEvent>();
    let timers = TokioTimerService::new(tx.clone());

    // Forward store change notifications into the dispatch channel.
    let mut changes = store.subscribe();
    let forward = tx.clone();
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(event) => {
                    if forward.send(event).is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    error!(missed, "dropped state-change notifications");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    spawn_daily(tx, reset_time);

    let mut controller = WakeStateController::new(
        ControllerConfig {
            awake_state: config.entities.awake_state.clone(),
            ux_awake_state: config.entities.ux_awake_state.clone(),
            next_alarm_sensor: config.entities.next_alarm_sensor.clone(),
            next_wake_state: config.entities.next_wake_state.clone(),
            window,
        },
        Arc::clone(&store),
        timers,
    );
    controller.reconcile_startup().await?;

    info!(%window, reset = %reset_time, "wakemond running");
    loop {
        tokio::select! {
            maybe = rx.recv() => {
                let Some(event) = maybe else { break };
                // The monitor must outlive any single bad event.
                if let Err(err) = controller.handle_event(&event).await {
                    error!(%err, "event handling failed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
