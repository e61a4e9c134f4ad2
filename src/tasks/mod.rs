//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod notifier;
pub mod tick_driver;

// Re-export main functions
pub use notifier::notifier_task;
pub(crate) use tick_driver::run_tick_driver;
