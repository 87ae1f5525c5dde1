//! Liveness and session probes.

use std::sync::Arc;

use axum::{Json, extract::State};
use cms_gate_telemetry::build_sha;

use crate::models::{HealthResponse, SessionResponse};
use crate::state::ApiState;

pub(crate) async fn health(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        provider: state.provider.name().to_string(),
        build: build_sha().to_string(),
    })
}

/// Only reachable through the authorization middleware.
pub(crate) async fn session(State(state): State<Arc<ApiState>>) -> Json<SessionResponse> {
    Json(SessionResponse {
        provider: state.provider.name().to_string(),
        authorized: true,
    })
}
