//! Main application state management

use std::time::Instant;

use crate::engine::TimerEngine;

/// Main application state handed to the HTTP router
pub struct AppState {
    /// The timer engine; all intents and reads go through it
    pub engine: TimerEngine,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Create a new AppState with an idle timer
    pub fn new(port: u16, host: String, work_minutes: i64, break_minutes: i64) -> Self {
        Self {
            engine: TimerEngine::new(work_minutes, break_minutes),
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
