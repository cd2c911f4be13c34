//! Authoritative session engine for the blind-bid auction room.
//!
//! The engine is synchronous and deterministic: every external event (join,
//! nominate, bid, disconnect) and every timer event (countdown tick,
//! scheduled nomination prompt) enters through the single serialized entry
//! point [`Room::handle`], and all observable behavior comes back out as
//! [`Effect`] values. The engine never spawns tasks, sleeps, or touches a
//! socket; the transport crate owns the event queue and the clock.
//!
//! # Architecture
//!
//! ```text
//! WS clients ──┐                       ┌── unicast/broadcast messages
//!              ├─► event queue ─► Room ┤
//! timer tasks ─┘   (one consumer)      └── ticker/schedule requests
//! ```
//!
//! Because one consumer drains the queue, no two Room mutations interleave:
//! a last-moment bid and the closing tick resolve in whichever order they
//! were enqueued, and anything after the close is rejected.
//!
//! # Modules
//!
//! - [`registry`]: participant admission, seats, removal
//! - [`rotation`]: round-robin nomination cursor over seats
//! - [`window`]: per-round countdown-gated blind bid collection
//! - [`resolve`]: winner computation (amount desc, timestamp asc)
//! - [`room`]: the top-level state machine composing the above
//! - [`events`]: inbound [`Event`]s, outbound [`ServerMessage`]s, [`Effect`]s

pub mod error;
pub mod events;
pub mod registry;
pub mod resolve;
pub mod room;
pub mod rotation;
pub mod window;

pub use error::{AdmissionError, BidError, NominateError};
pub use events::{Effect, Event, ParticipantSummary, ServerMessage};
pub use registry::Registry;
pub use resolve::{resolve, Outcome};
pub use room::{Room, RoomConfig};
pub use rotation::Rotation;
pub use window::Window;
