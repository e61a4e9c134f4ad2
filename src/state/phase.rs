//! Work/break phase enumeration

use serde::{Deserialize, Serialize};

/// The two recurring states of the Pomodoro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    /// Display label used by frontends and notifications
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::Break => "Break",
        }
    }
}
