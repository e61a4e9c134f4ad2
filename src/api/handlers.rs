//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info};

use super::responses::{ApiResponse, ConfigureRequest, HealthResponse, StatusResponse};
use crate::state::{AppState, Phase};

/// Handle POST /start - Begin or resume the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.engine.start() {
        Ok(timer) => {
            info!(
                "Start endpoint called - {} phase, {} remaining",
                timer.phase.label(),
                timer.clock
            );
            Ok(Json(ApiResponse::for_snapshot(
                "Timer started".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to start timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Halt the countdown
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.engine.pause() {
        Ok(timer) => {
            info!("Pause endpoint called - {} remaining", timer.clock);
            Ok(Json(ApiResponse::for_snapshot(
                "Timer paused".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to pause timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /toggle - Single-button start/pause
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.engine.toggle_start_pause() {
        Ok(timer) => {
            info!(
                "Toggle endpoint called - timer now {}",
                if timer.running { "running" } else { "paused" }
            );
            Ok(Json(ApiResponse::for_snapshot(
                "Timer toggled".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Return to a fresh focus phase
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.engine.reset() {
        Ok(timer) => {
            info!("Reset endpoint called");
            Ok(Json(ApiResponse::for_snapshot(
                "Timer reset".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /configure - Store new phase lengths and reset
pub async fn configure_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfigureRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state
        .engine
        .configure(request.work_minutes, request.break_minutes)
    {
        Ok(timer) => {
            info!(
                "Configure endpoint called - work={}s, break={}s",
                timer.work_duration_seconds, timer.break_duration_seconds
            );
            Ok(Json(ApiResponse::for_snapshot(
                "Durations updated".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to configure timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /focus - Jump to the focus phase
pub async fn focus_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    switch_phase(state, Phase::Focus)
}

/// Handle POST /break - Jump to the break phase
pub async fn break_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    switch_phase(state, Phase::Break)
}

fn switch_phase(state: Arc<AppState>, target: Phase) -> Result<Json<ApiResponse>, StatusCode> {
    match state.engine.switch_phase(target) {
        Ok(timer) => {
            info!("Switch endpoint called - {} phase active", timer.phase.label());
            Ok(Json(ApiResponse::for_snapshot(
                format!("{} phase selected", target.label()),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to switch phase: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the current snapshot and server metadata
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.engine.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to read timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_intent, last_intent_time) = state.engine.last_intent();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_intent,
        last_intent_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
