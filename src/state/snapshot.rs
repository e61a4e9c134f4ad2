//! Immutable timer readout for renderers

use serde::{Deserialize, Serialize};

use super::Phase;

/// Snapshot of the timer published after every state change.
///
/// `progress_fraction` is the continuous completion value in [0, 1] for
/// the active phase; everything else is the authoritative integer state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub running: bool,
    pub round: u64,
    pub progress_fraction: f64,
    pub work_duration_seconds: u64,
    pub break_duration_seconds: u64,
    /// Remaining time pre-formatted as MM:SS for digit displays
    pub clock: String,
}

/// Format a second count as MM:SS
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
