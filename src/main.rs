//! Take Five - A state-managed Pomodoro timer server
//!
//! This is the main entry point for the take-five application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use take_five::{
    api::create_router, config::Config, state::AppState, tasks::notifier_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "take_five={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting take-five server v1.0.0");
    info!(
        "Configuration: host={}, port={}, work={}min, break={}min",
        config.host, config.port, config.work, config.break_minutes
    );

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.work,
        config.break_minutes,
    ));

    // Announce automatic phase transitions on the desktop
    let notifier_engine = state.engine.clone();
    tokio::spawn(async move {
        notifier_task(notifier_engine).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start     - Start or resume the countdown");
    info!("  POST /pause     - Pause the countdown");
    info!("  POST /toggle    - Single-button start/pause");
    info!("  POST /reset     - Return to a fresh focus phase");
    info!("  POST /configure - Set focus/break lengths in minutes");
    info!("  POST /focus     - Jump to the focus phase");
    info!("  POST /break     - Jump to the break phase");
    info!("  GET  /status    - Current snapshot and server metadata");
    info!("  GET  /health    - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
