//! One-second tick driver background task

use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, error};

use crate::engine::TimerEngine;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Drive the engine's authoritative countdown while the timer runs.
///
/// Spawned by `TimerEngine::start`, which retains the `JoinHandle` so the
/// stopping intents can abort it. The loop also exits on its own when the
/// engine reports the running flag has cleared.
pub(crate) async fn run_tick_driver(engine: TimerEngine) {
    debug!("Tick driver started");

    let mut ticker = interval(TICK_INTERVAL);
    // The first interval tick completes immediately; consuming it here
    // keeps the countdown from losing a second on start
    ticker.tick().await;

    loop {
        ticker.tick().await;

        match engine.tick() {
            Ok(true) => {}
            Ok(false) => {
                debug!("Timer no longer running, tick driver exiting");
                break;
            }
            Err(e) => {
                error!("Tick driver failed to advance the timer: {}", e);
                break;
            }
        }
    }
}
