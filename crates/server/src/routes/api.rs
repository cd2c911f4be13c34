//! REST API endpoints.
//!
//! Read-only views of the room for dashboards and debugging; all mutation
//! goes through the WebSocket protocol.
//!
//! # Endpoints
//!
//! - `GET /api/status` - room phase, membership, items remaining
//! - `GET /api/items` - items still available for nomination
//! - `GET /api/items/{id}` - one available item, 404 once sold or passed

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use types::{Item, Phase};

use crate::error::{AppError, AppResult};
use crate::state::ServerState;

/// Room status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Current phase.
    pub phase: Phase,
    /// Current participant count.
    pub count: usize,
    /// Fixed room capacity.
    pub capacity: usize,
    /// Items still available for nomination.
    pub items_remaining: usize,
}

/// Get room status: `GET /api/status`
pub async fn get_status(State(state): State<ServerState>) -> Json<StatusResponse> {
    let status = state.status.read().await;

    Json(StatusResponse {
        phase: status.phase,
        count: status.count,
        capacity: status.capacity,
        items_remaining: status.items.len(),
    })
}

/// List available items: `GET /api/items`
pub async fn get_items(State(state): State<ServerState>) -> Json<Vec<Item>> {
    Json(state.status.read().await.items.clone())
}

/// Get one available item: `GET /api/items/{id}`
///
/// Returns 404 for identifiers that are sold, passed, or never existed;
/// availability is all the room exposes.
pub async fn get_item(
    State(state): State<ServerState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Item>> {
    let status = state.status.read().await;
    status
        .items
        .iter()
        .find(|item| item.id.0 == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("item {}", id)))
}
