//! State management module
//!
//! This module contains the timer state machine and the snapshot types it
//! publishes to renderers.

pub mod app_state;
pub mod phase;
pub mod snapshot;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use phase::Phase;
pub use snapshot::TimerSnapshot;
pub use timer_state::TimerState;
