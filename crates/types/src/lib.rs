//! Core types for the auction draft server.
//!
//! This crate provides all shared data types used across the engine and
//! transport crates: identity newtypes, the item and participant records,
//! and the room phase enum. No I/O, no async.

use derive_more::{Add, AddAssign, From, Into, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// Core ID Types (Newtypes for type safety)
// =============================================================================

/// Opaque per-connection participant identity.
///
/// Assigned by the transport layer when a socket connects; the engine never
/// inspects its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    /// Generate a fresh random identity.
    pub fn random() -> Self {
        ParticipantId(Uuid::new_v4())
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant({})", self.0)
    }
}

/// Unique identifier for catalog items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item({})", self.0)
    }
}

/// A participant's fixed position in the turn-rotation order.
///
/// Assigned ascending from 0 at admission and never reused within a room's
/// lifetime; a removed participant leaves a gap rather than renumbering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Seat(pub usize);

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat({})", self.0)
    }
}

// =============================================================================
// Time Types
// =============================================================================

/// Milliseconds since room start (monotonic within a room).
pub type Timestamp = u64;

// =============================================================================
// Money Types
// =============================================================================

/// A single bid value. Valid bids are in `1..=budget`.
pub type Amount = u64;

/// Non-negative integer funds (newtype for type safety).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Sum,
    From,
    Into,
)]
pub struct Budget(pub u64);

impl Budget {
    pub const ZERO: Budget = Budget(0);

    /// Get raw value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Check if zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Saturating subtraction.
    #[inline]
    pub fn saturating_sub(self, rhs: Amount) -> Self {
        Budget(self.0.saturating_sub(rhs))
    }

    /// Whether this budget covers `amount`.
    #[inline]
    pub fn covers(self, amount: Amount) -> bool {
        amount <= self.0
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

// =============================================================================
// Item
// =============================================================================

/// One auctionable item from the catalog.
///
/// Immutable after load except for the one-time `cost` assignment at sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier within the catalog.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Category tag (e.g. position).
    pub category: String,
    /// Optional grouping column (e.g. team).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Acquisition cost, set exactly once when sold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Amount>,
}

impl Item {
    /// Create an unsold item.
    pub fn new(id: ItemId, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            group: None,
            cost: None,
        }
    }

    /// Attach the optional grouping column.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Whether the item has been sold.
    pub fn is_sold(&self) -> bool {
        self.cost.is_some()
    }
}

// =============================================================================
// Participant
// =============================================================================

/// A seated room member.
///
/// Invariant: `initial_budget - budget == sum(cost of acquired items)`.
/// Mutated only by round resolution; removed from the registry on disconnect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Opaque connection key.
    pub id: ParticipantId,
    /// Display name supplied at join.
    pub name: String,
    /// Remaining funds.
    pub budget: Budget,
    /// Acquired items in acquisition order, each with `cost` set.
    pub acquired: Vec<Item>,
    /// Stable rotation index assigned at admission.
    pub seat: Seat,
}

impl Participant {
    /// Create a participant with a full budget and empty roster.
    pub fn new(id: ParticipantId, name: impl Into<String>, budget: Budget, seat: Seat) -> Self {
        Self {
            id,
            name: name.into(),
            budget,
            acquired: Vec::new(),
            seat,
        }
    }

    /// Number of items acquired so far.
    pub fn acquired_count(&self) -> usize {
        self.acquired.len()
    }
}

// =============================================================================
// Phase
// =============================================================================

/// Externally observable room phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Collecting participants; admissions allowed.
    Waiting,
    /// Nomination/bidding rounds in progress.
    Auction,
    /// Catalog exhausted; final states published.
    Complete,
    /// Terminated early (disconnect below capacity); non-resumable.
    Aborted,
}

impl Phase {
    /// Whether the room accepts any further mutation.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Complete | Phase::Aborted)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Waiting => "waiting",
            Phase::Auction => "auction",
            Phase::Complete => "complete",
            Phase::Aborted => "aborted",
        };
        write!(f, "{}", s)
    }
}

// =============================================================================
// Bid
// =============================================================================

/// One hidden bid as recorded by the bidding window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Bid value in budget units.
    pub amount: Amount,
    /// Submission time; tie-break key (earliest wins among equal amounts).
    pub at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_arithmetic() {
        let b = Budget(100);
        assert!(b.covers(100));
        assert!(!b.covers(101));
        assert_eq!(b.saturating_sub(30), Budget(70));
        assert_eq!(Budget(5).saturating_sub(10), Budget::ZERO);
        assert!(Budget::ZERO.is_zero());
    }

    #[test]
    fn test_item_sale_marking() {
        let mut item = Item::new(ItemId(1), "Patrick Mahomes", "QB").with_group("KC");
        assert!(!item.is_sold());
        item.cost = Some(42);
        assert!(item.is_sold());
    }

    #[test]
    fn test_participant_new_is_empty() {
        let p = Participant::new(ParticipantId::random(), "alice", Budget(100), Seat(0));
        assert_eq!(p.acquired_count(), 0);
        assert_eq!(p.budget, Budget(100));
    }

    #[test]
    fn test_phase_terminality() {
        assert!(!Phase::Waiting.is_terminal());
        assert!(!Phase::Auction.is_terminal());
        assert!(Phase::Complete.is_terminal());
        assert!(Phase::Aborted.is_terminal());
    }

    #[test]
    fn test_item_serialization_skips_absent_cost() {
        let item = Item::new(ItemId(3), "Cooper Kupp", "WR");
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("cost"));
        assert!(json.contains("\"Cooper Kupp\""));
    }
}
