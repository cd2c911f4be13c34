//! Health check endpoint.
//!
//! `GET /health` - liveness probe (always 200 if the server is up), with
//! the current room phase and connection gauge for quick inspection.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use types::Phase;

use crate::state::ServerState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: &'static str,
    /// Current room phase.
    pub phase: Phase,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// Active WebSocket connections.
    pub ws_connections: u64,
}

/// Liveness probe: `GET /health`
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let phase = state.status.read().await.phase;

    Json(HealthResponse {
        status: "healthy",
        phase,
        uptime_secs: state.uptime_secs(),
        ws_connections: state.metrics.ws_count(),
    })
}
