//! WebSocket handler: the push transport into and out of the room.
//!
//! # Endpoint
//!
//! - `GET /ws` - WebSocket upgrade
//!
//! # Protocol
//!
//! Each connection gets a fresh opaque identity and a private outbound
//! queue registered with the room task. Incoming text frames are parsed as
//! [`ClientMessage`] and forwarded into the room's serialized queue;
//! unparseable frames are logged and dropped. When either direction ends,
//! the handler emits `Event::Disconnect`, which may abort an in-progress
//! round.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use types::ParticipantId;

use crate::protocol::ClientMessage;
use crate::room_task::RoomInbound;
use crate::state::ServerState;

/// WebSocket upgrade handler: `GET /ws`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<ServerState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle a WebSocket connection for its whole lifetime.
async fn handle_socket(socket: WebSocket, state: ServerState) {
    let id = ParticipantId::random();
    state.metrics.ws_connect();
    debug!(%id, "WebSocket client connected");

    let (mut sender, mut receiver) = socket.split();

    // Register this connection's private outbound queue with the room task.
    let (out_tx, mut out_rx) = mpsc::unbounded_channel();
    if state
        .inbound
        .send(RoomInbound::Connect { id, tx: out_tx })
        .is_err()
    {
        warn!(%id, "room task is gone, dropping connection");
        state.metrics.ws_disconnect();
        return;
    }

    // Forward room messages to the client.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break; // Client disconnected
                    }
                }
                Err(e) => {
                    warn!("failed to serialize room message: {}", e);
                }
            }
        }
    });

    // Forward client messages into the room's serialized queue.
    let inbound = state.inbound.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if let Ok(msg) = serde_json::from_str::<ClientMessage>(&text) {
                        if inbound.send(RoomInbound::Client { id, msg }).is_err() {
                            break; // Room task gone
                        }
                    } else {
                        debug!(%id, "invalid message from client: {}", text);
                    }
                }
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    warn!(%id, "WebSocket error: {}", e);
                    break;
                }
                _ => {} // Ignore ping/pong/binary
            }
        }
    });

    // Wait for either direction to end.
    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    // Tell the room; mid-auction this may abort the round.
    let _ = state
        .inbound
        .send(RoomInbound::Event(engine::Event::Disconnect { id }));

    state.metrics.ws_disconnect();
    debug!(%id, "WebSocket client disconnected");
}
