//! Server crate: the axum transport around the auction room engine.
//!
//! Bridges WebSocket clients to the synchronous [`engine::Room`] through a
//! single mpsc queue, so every client action and every timer event mutates
//! the room in one total order.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   RoomInbound    ┌─────────────────────────┐
//! │  WS connections  │ ───────────────► │  Room task (one loop)   │
//! │  (axum handlers) │                  │  room.handle(event)     │
//! │                  │ ◄─────────────── │  + ticker/delay tasks   │
//! └──────────────────┘  ServerMessage   └─────────────────────────┘
//!                       (per-conn queue)
//! ```
//!
//! Unlike a broadcast-only feed, each connection gets its own outbound
//! queue: bid acknowledgements and nomination prompts are private, while
//! room-wide notices fan out to every queue.
//!
//! # Modules
//!
//! - [`app`]: Axum application builder and router setup
//! - [`state`]: Shared server state (room queue handle, metrics, status)
//! - [`error`]: REST error type with HTTP status mapping
//! - [`protocol`]: Wire message types for the WebSocket protocol
//! - [`room_task`]: The serialized event loop owning the Room
//! - [`routes`]: HTTP route handlers (health, status, items, ws)

pub mod app;
pub mod error;
pub mod protocol;
pub mod room_task;
pub mod routes;
pub mod state;

pub use app::{create_app, ServerConfig};
pub use error::{AppError, AppResult};
pub use protocol::ClientMessage;
pub use room_task::{RoomInbound, RoomTask};
pub use state::{RoomStatus, ServerState};
