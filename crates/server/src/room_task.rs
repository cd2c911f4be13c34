//! The serialized event loop owning the Room.
//!
//! Exactly one task runs [`RoomTask::run`]; it is the only code that ever
//! mutates the [`Room`]. WebSocket handlers, the countdown ticker, and
//! delayed nomination prompts all feed the same queue, so a last-moment bid
//! and the closing tick resolve in arrival order and never interleave.
//!
//! The countdown is a plain `tokio::time::interval` task whose only effect
//! is to enqueue `Event::Tick { round }`; the room decides what a tick
//! means. Stopping the ticker aborts the task; stopping twice is a no-op
//! because the handle is `take()`n, and any tick already queued is ignored
//! by the room's round-number guard.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use engine::{Effect, Event, Room, ServerMessage};
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, trace};
use types::{ParticipantId, Timestamp};

use crate::protocol::ClientMessage;
use crate::state::RoomStatus;

/// Everything that can arrive on the room task's queue.
#[derive(Debug)]
pub enum RoomInbound {
    /// A new connection registered its outbound queue.
    Connect {
        id: ParticipantId,
        tx: mpsc::UnboundedSender<ServerMessage>,
    },
    /// A parsed message from a connected client.
    Client { id: ParticipantId, msg: ClientMessage },
    /// A raw room event (timers, disconnects).
    Event(Event),
}

/// Owns the Room and the side-effect machinery around it.
pub struct RoomTask {
    room: Room,
    connections: HashMap<ParticipantId, mpsc::UnboundedSender<ServerMessage>>,
    // Feeds timer events back into the same queue `run` drains.
    feedback: mpsc::UnboundedSender<RoomInbound>,
    ticker: Option<JoinHandle<()>>,
    started: Instant,
    status: Arc<RwLock<RoomStatus>>,
}

impl RoomTask {
    /// Wrap a freshly built room.
    pub fn new(room: Room, feedback: mpsc::UnboundedSender<RoomInbound>) -> Self {
        let status = Arc::new(RwLock::new(RoomStatus::waiting(
            room.capacity(),
            room.available_items().to_vec(),
        )));
        Self {
            room,
            connections: HashMap::new(),
            feedback,
            ticker: None,
            started: Instant::now(),
            status,
        }
    }

    /// Handle to the status snapshot refreshed after every event.
    pub fn status_handle(&self) -> Arc<RwLock<RoomStatus>> {
        Arc::clone(&self.status)
    }

    /// Drain the queue until every sender is gone.
    pub async fn run(mut self, mut rx: mpsc::UnboundedReceiver<RoomInbound>) {
        self.publish_status().await;
        while let Some(inbound) = rx.recv().await {
            self.dispatch(inbound).await;
        }
        self.stop_ticker();
        debug!("room task queue closed, shutting down");
    }

    /// Room clock: milliseconds since the task started.
    fn now(&self) -> Timestamp {
        self.started.elapsed().as_millis() as Timestamp
    }

    async fn dispatch(&mut self, inbound: RoomInbound) {
        match inbound {
            RoomInbound::Connect { id, tx } => {
                trace!(%id, "connection registered");
                self.connections.insert(id, tx);
            }
            RoomInbound::Client { id, msg } => {
                let event = match msg {
                    ClientMessage::Join { name } => Event::Join { id, name },
                    ClientMessage::Nominate { item_id } => Event::Nominate { id, item_id },
                    ClientMessage::Bid { amount } => Event::Bid { id, amount },
                };
                self.apply(event).await;
            }
            RoomInbound::Event(event) => self.apply(event).await,
        }
    }

    async fn apply(&mut self, event: Event) {
        // A dropped connection also loses its outbound queue.
        if let Event::Disconnect { id } = &event {
            self.connections.remove(id);
        }

        let now = self.now();
        let effects = self.room.handle(event, now);
        for effect in effects {
            self.perform(effect);
        }
        self.publish_status().await;
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::Unicast(id, msg) => {
                if let Some(tx) = self.connections.get(&id) {
                    // A send failure just means the socket is going away;
                    // the Disconnect event will clean up.
                    let _ = tx.send(msg);
                }
            }
            Effect::Broadcast(msg) => {
                for tx in self.connections.values() {
                    let _ = tx.send(msg.clone());
                }
            }
            Effect::StartTicker { round } => self.start_ticker(round),
            Effect::StopTicker => self.stop_ticker(),
            Effect::Schedule { after_ms, event } => {
                let tx = self.feedback.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(after_ms)).await;
                    let _ = tx.send(RoomInbound::Event(event));
                });
            }
        }
    }

    fn start_ticker(&mut self, round: u64) {
        self.stop_ticker();
        let tx = self.feedback.clone();
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick completes immediately; skip it so the
            // countdown decrements one second after the window opens.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(RoomInbound::Event(Event::Tick { round })).is_err() {
                    break;
                }
            }
        }));
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    async fn publish_status(&self) {
        let mut status = self.status.write().await;
        *status = RoomStatus {
            phase: self.room.phase(),
            count: self.room.participant_count(),
            capacity: self.room.capacity(),
            items: self.room.available_items().to_vec(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Catalog;
    use engine::RoomConfig;
    use types::{Item, ItemId, Phase};

    fn task() -> (
        RoomTask,
        mpsc::UnboundedSender<RoomInbound>,
        mpsc::UnboundedReceiver<RoomInbound>,
    ) {
        let catalog = Catalog::new(vec![Item::new(ItemId(1), "Patrick Mahomes", "QB")]);
        let room = Room::new(RoomConfig::default(), catalog);
        let (tx, rx) = mpsc::unbounded_channel();
        (RoomTask::new(room, tx.clone()), tx, rx)
    }

    #[tokio::test]
    async fn test_join_reaches_room_and_answers_privately() {
        let (mut task, _tx, _rx) = task();
        let id = ParticipantId::random();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();

        task.dispatch(RoomInbound::Connect { id, tx: out_tx }).await;
        task.dispatch(RoomInbound::Client {
            id,
            msg: ClientMessage::Join { name: "alice".into() },
        })
        .await;

        let msg = out_rx.recv().await.unwrap();
        assert!(matches!(msg, ServerMessage::Joined { count: 1, .. }));
        let msg = out_rx.recv().await.unwrap();
        assert!(matches!(msg, ServerMessage::CountChanged { count: 1, .. }));
    }

    #[tokio::test]
    async fn test_status_snapshot_tracks_room() {
        let (mut task, _tx, _rx) = task();
        let status = task.status_handle();
        task.publish_status().await;
        assert_eq!(status.read().await.phase, Phase::Waiting);
        assert_eq!(status.read().await.items.len(), 1);

        let id = ParticipantId::random();
        let (out_tx, _out_rx) = mpsc::unbounded_channel();
        task.dispatch(RoomInbound::Connect { id, tx: out_tx }).await;
        task.dispatch(RoomInbound::Client {
            id,
            msg: ClientMessage::Join { name: "alice".into() },
        })
        .await;

        assert_eq!(status.read().await.count, 1);
    }

    #[tokio::test]
    async fn test_disconnect_drops_outbound_queue() {
        let (mut task, _tx, _rx) = task();
        let id = ParticipantId::random();
        let (out_tx, _out_rx) = mpsc::unbounded_channel();
        task.dispatch(RoomInbound::Connect { id, tx: out_tx }).await;
        assert_eq!(task.connections.len(), 1);

        task.dispatch(RoomInbound::Event(Event::Disconnect { id }))
            .await;
        assert!(task.connections.is_empty());
    }

    #[tokio::test]
    async fn test_stop_ticker_twice_is_noop() {
        let (mut task, _tx, _rx) = task();
        task.start_ticker(0);
        task.stop_ticker();
        task.stop_ticker();
        assert!(task.ticker.is_none());
    }
}
