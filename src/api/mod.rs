//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.
//! The endpoints are the intent surface a browser frontend drives; every
//! response carries the resulting timer snapshot.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/toggle", post(toggle_handler))
        .route("/reset", post(reset_handler))
        .route("/configure", post(configure_handler))
        .route("/focus", post(focus_handler))
        .route("/break", post(break_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(0, "127.0.0.1".to_string(), 25, 5))
    }

    #[tokio::test]
    async fn health_endpoint_responds_ok() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn status_endpoint_responds_ok() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn start_intent_flips_the_running_flag() {
        let state = test_state();
        let app = create_router(Arc::clone(&state));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/start")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.engine.is_running().unwrap());

        state.engine.pause().unwrap();
    }

    #[tokio::test]
    async fn configure_intent_clamps_out_of_range_minutes() {
        let state = test_state();
        let app = create_router(Arc::clone(&state));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/configure")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"work_minutes": 0, "break_minutes": 120}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let snapshot = state.engine.snapshot().unwrap();
        assert_eq!(snapshot.work_duration_seconds, 60);
        assert_eq!(snapshot.break_duration_seconds, 3600);
    }

    #[tokio::test]
    async fn break_intent_switches_the_phase() {
        let state = test_state();
        let app = create_router(Arc::clone(&state));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/break")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let snapshot = state.engine.snapshot().unwrap();
        assert_eq!(snapshot.phase, crate::state::Phase::Break);
        assert_eq!(snapshot.remaining_seconds, 300);
    }
}
