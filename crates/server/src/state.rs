//! Shared server state.
//!
//! Contains the handle into the room task's queue, the cached room status
//! snapshot for the REST surface, and connection metrics. Cloned into each
//! handler via Axum's State extractor; the room itself is never touched
//! from here.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, RwLock};
use types::{Item, Phase};

use crate::room_task::RoomInbound;

/// Read-only snapshot of the room, refreshed by the room task after every
/// handled event.
#[derive(Debug, Clone)]
pub struct RoomStatus {
    /// Current phase.
    pub phase: Phase,
    /// Current participant count.
    pub count: usize,
    /// Fixed room capacity.
    pub capacity: usize,
    /// Items still available for nomination.
    pub items: Vec<Item>,
}

impl RoomStatus {
    /// Snapshot an empty waiting room.
    pub fn waiting(capacity: usize, items: Vec<Item>) -> Self {
        Self {
            phase: Phase::Waiting,
            count: 0,
            capacity,
            items,
        }
    }
}

/// Shared state for all route handlers.
#[derive(Clone)]
pub struct ServerState {
    /// Queue into the room task (client events, connection registration).
    pub inbound: mpsc::UnboundedSender<RoomInbound>,

    /// Server start time.
    pub start_time: Instant,

    /// Shared metrics.
    pub metrics: Arc<ServerMetrics>,

    /// Cached room status for REST endpoints.
    pub status: Arc<RwLock<RoomStatus>>,
}

impl ServerState {
    /// Create new server state around the room task's queue and status cell.
    pub fn new(
        inbound: mpsc::UnboundedSender<RoomInbound>,
        status: Arc<RwLock<RoomStatus>>,
    ) -> Self {
        Self {
            inbound,
            start_time: Instant::now(),
            metrics: Arc::new(ServerMetrics::new()),
            status,
        }
    }

    /// Get uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Server-side metrics.
pub struct ServerMetrics {
    /// Active WebSocket connections.
    pub ws_connections: AtomicU64,
}

impl ServerMetrics {
    /// Create new metrics.
    pub fn new() -> Self {
        Self {
            ws_connections: AtomicU64::new(0),
        }
    }

    /// Increment WebSocket connection count.
    pub fn ws_connect(&self) {
        self.ws_connections.fetch_add(1, Ordering::Relaxed);
    }

    /// Decrement WebSocket connection count.
    pub fn ws_disconnect(&self) {
        self.ws_connections.fetch_sub(1, Ordering::Relaxed);
    }

    /// Current WebSocket connection count.
    pub fn ws_count(&self) -> u64 {
        self.ws_connections.load(Ordering::Relaxed)
    }
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_connection_gauge() {
        let metrics = ServerMetrics::new();
        metrics.ws_connect();
        metrics.ws_connect();
        metrics.ws_disconnect();
        assert_eq!(metrics.ws_count(), 1);
    }

    #[test]
    fn test_waiting_status() {
        let status = RoomStatus::waiting(2, Vec::new());
        assert_eq!(status.phase, Phase::Waiting);
        assert_eq!(status.count, 0);
        assert_eq!(status.capacity, 2);
    }
}
