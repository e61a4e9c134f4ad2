//! End-of-phase notification background task

use notify_rust::Notification;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::engine::TimerEngine;
use crate::state::Phase;

/// Background task that announces automatic phase transitions.
///
/// Consumes the engine's end-of-phase events and raises a desktop
/// notification for the phase that just began. Delivery is fire-and-forget:
/// a desktop that cannot show it loses nothing but the chime.
pub async fn notifier_task(engine: TimerEngine) {
    info!("Starting phase notifier task");

    let mut events = engine.phase_events();

    loop {
        match events.recv().await {
            Ok(_) => {
                let snapshot = match engine.snapshot() {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        warn!("Failed to read snapshot for notification: {}", e);
                        continue;
                    }
                };

                let summary = format!("{} time", snapshot.phase.label());
                let body = match snapshot.phase {
                    Phase::Focus => format!(
                        "Break is over. Round {} starts with {} on the clock.",
                        snapshot.round, snapshot.clock
                    ),
                    Phase::Break => format!(
                        "Round {} done. Step away for {}.",
                        snapshot.round.saturating_sub(1),
                        snapshot.clock
                    ),
                };

                if let Err(e) = Notification::new().summary(&summary).body(&body).show() {
                    debug!("Desktop notification failed: {}", e);
                }
            }
            Err(RecvError::Lagged(missed)) => {
                warn!("Phase notifier lagged, {} events dropped", missed);
            }
            Err(RecvError::Closed) => {
                debug!("Phase event channel closed, notifier exiting");
                break;
            }
        }
    }
}
