//! Inbound events, outbound notifications, and effects.
//!
//! [`Event`] is everything that can reach the room: client actions forwarded
//! by the transport and timer events fed back through the same queue, so
//! timer-driven and client-driven mutations share one total order.
//!
//! [`Effect`] is everything the room asks the outside world to do. Effects
//! carry owned data out of the engine; nothing inside the engine retains a
//! reference past the `handle` call that produced it.

use serde::Serialize;
use types::{Amount, Item, ItemId, Participant, ParticipantId, Seat};

/// One serialized room event.
///
/// `Tick` and `NominationDue` carry the round sequence number they were
/// scheduled for; events from a round that has since closed or aborted are
/// ignored by the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A connection asks to join with a display name.
    Join { id: ParticipantId, name: String },
    /// The current nominator selects the next item for bidding.
    Nominate { id: ParticipantId, item_id: ItemId },
    /// A hidden bid on the currently nominated item.
    Bid { id: ParticipantId, amount: Amount },
    /// The connection dropped (any phase).
    Disconnect { id: ParticipantId },
    /// One-second countdown tick for the given round.
    Tick { round: u64 },
    /// Scheduled prompt to request the next nomination.
    NominationDue { round: u64 },
}

/// Public view of a participant for room-wide payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantSummary {
    pub name: String,
    pub budget: u64,
    pub seat: Seat,
    pub acquired: Vec<Item>,
}

impl From<&Participant> for ParticipantSummary {
    fn from(p: &Participant) -> Self {
        Self {
            name: p.name.clone(),
            budget: p.budget.raw(),
            seat: p.seat,
            acquired: p.acquired.clone(),
        }
    }
}

/// Outbound notification pushed to one or all participants.
///
/// Bid contents stay private: `BidAccepted`/`BidRejected` are unicast to the
/// bidder only, and no message ever reveals another participant's bid before
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Private admission confirmation.
    Joined {
        name: String,
        count: usize,
        capacity: usize,
    },
    /// Private admission failure.
    JoinRejected { reason: String },
    /// Room-wide membership update.
    CountChanged { count: usize, capacity: usize },
    /// The room reached capacity and the auction begins.
    RoomStarted {
        participants: Vec<ParticipantSummary>,
    },
    /// To the current nominator: pick from these available items.
    NominationRequest { items: Vec<Item> },
    /// To everyone else: who is nominating.
    NominationWait { nominator: String },
    /// Private nomination failure.
    NominationRejected { reason: String },
    /// A round opened on this item.
    WindowOpened { item: Item, seconds: u64 },
    /// Countdown value, broadcast once per tick.
    Countdown { remaining: u64 },
    /// Private: your bid was recorded (overwrites any earlier one).
    BidAccepted { amount: Amount },
    /// Private: your bid was refused.
    BidRejected { reason: String },
    /// Round outcome: the item sold.
    RoundWon {
        item: Item,
        winner: String,
        amount: Amount,
    },
    /// Round outcome: no bids; the item leaves circulation.
    RoundPassed { item: Item },
    /// Catalog exhausted; final budgets and rosters.
    RoomComplete {
        participants: Vec<ParticipantSummary>,
    },
    /// The room died early and accepts nothing further.
    RoomAborted { reason: String },
}

/// A side effect requested by the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver a message to one connection.
    Unicast(ParticipantId, ServerMessage),
    /// Deliver a message to every connection.
    Broadcast(ServerMessage),
    /// Start a one-second ticker feeding `Event::Tick { round }`.
    StartTicker { round: u64 },
    /// Cancel the running ticker, if any (no-op when already stopped).
    StopTicker,
    /// Feed `event` back into the queue after `after_ms` milliseconds.
    Schedule { after_ms: u64, event: Event },
}
