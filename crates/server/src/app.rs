//! Axum application builder.
//!
//! Configures routes, middleware, and state for the server.

use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{api, health, ws};
use crate::state::ServerState;

/// Create the Axum application with all routes.
pub fn create_app(state: ServerState) -> Router {
    // CORS layer for frontend development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        // Health endpoint
        .route("/health", get(health::health))
        // WebSocket endpoint
        .route("/ws", get(ws::ws_handler))
        // REST views
        .route("/api/status", get(api::get_status))
        .route("/api/items", get(api::get_items))
        .route("/api/items/{id}", get(api::get_item))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // State
        .with_state(state)
}

/// Server bind configuration.
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Host to bind to.
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".into(),
        }
    }
}

impl ServerConfig {
    /// Get bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RoomStatus;
    use std::sync::Arc;
    use tokio::sync::{mpsc, RwLock};

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_create_app() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let status = Arc::new(RwLock::new(RoomStatus::waiting(2, Vec::new())));
        let state = ServerState::new(tx, status);

        let _app = create_app(state);
        // App created successfully
    }
}
