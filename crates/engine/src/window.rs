//! Bidding window: per-round countdown-gated blind bid collection.
//!
//! A window is one-shot: constructed open for a nominated item, it collects
//! at most one live bid per participant (later bids overwrite earlier ones)
//! and closes when the countdown reaches zero or `close()` is called.
//! A fresh window is built each round and never reused.

use std::collections::HashMap;

use types::{Amount, Bid, Budget, Item, ParticipantId, Timestamp};

use crate::error::BidError;

/// An open-or-closed bid collection round for a single item.
#[derive(Debug, Clone)]
pub struct Window {
    item: Item,
    remaining: u64,
    open: bool,
    bids: HashMap<ParticipantId, Bid>,
}

impl Window {
    /// Open a fresh window on `item` with a countdown of `duration_secs`.
    ///
    /// Construction is opening; an already-open window cannot be opened
    /// again because there is no other way to obtain one.
    pub fn open(item: Item, duration_secs: u64) -> Self {
        Self {
            item,
            remaining: duration_secs,
            open: true,
            bids: HashMap::new(),
        }
    }

    /// The item under auction.
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Whether bids are still being accepted.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Seconds left on the countdown.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Number of distinct participants with a live bid.
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    /// Record a hidden bid.
    ///
    /// The last accepted bid from a participant within the window is the one
    /// scored; earlier ones are overwritten. `budget` is the bidder's
    /// current budget, the upper bound for a valid amount.
    pub fn submit(
        &mut self,
        id: ParticipantId,
        amount: Amount,
        budget: Budget,
        at: Timestamp,
    ) -> Result<(), BidError> {
        if !self.open {
            return Err(BidError::WindowClosed);
        }
        if amount < 1 || !budget.covers(amount) {
            return Err(BidError::InvalidAmount);
        }
        self.bids.insert(id, Bid { amount, at });
        Ok(())
    }

    /// Advance the countdown by one tick; closes the window at zero.
    ///
    /// Returns the remaining value after the decrement.
    pub fn tick(&mut self) -> u64 {
        if !self.open {
            return 0;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.open = false;
        }
        self.remaining
    }

    /// Stop the countdown and return the accumulated bid set.
    ///
    /// Safe to call again after closing: a second call returns an empty
    /// snapshot, since the timer-expiry and early-resolution paths may both
    /// reach here.
    pub fn close(&mut self) -> HashMap<ParticipantId, Bid> {
        self.open = false;
        std::mem::take(&mut self.bids)
    }

    /// Consume the window, yielding the item for resolution.
    pub fn into_item(self) -> Item {
        self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ItemId;

    fn window() -> Window {
        Window::open(Item::new(ItemId(1), "Patrick Mahomes", "QB"), 3)
    }

    #[test]
    fn test_valid_bid_recorded() {
        let mut w = window();
        let id = ParticipantId::random();
        w.submit(id, 50, Budget(100), 10).unwrap();
        assert_eq!(w.bid_count(), 1);
    }

    #[test]
    fn test_last_bid_wins_within_round() {
        let mut w = window();
        let id = ParticipantId::random();
        w.submit(id, 10, Budget(100), 5).unwrap();
        w.submit(id, 20, Budget(100), 8).unwrap();

        let bids = w.close();
        assert_eq!(bids[&id], Bid { amount: 20, at: 8 });
    }

    #[test]
    fn test_amount_bounds() {
        let mut w = window();
        let id = ParticipantId::random();
        assert_eq!(
            w.submit(id, 0, Budget(100), 1),
            Err(BidError::InvalidAmount)
        );
        assert_eq!(
            w.submit(id, 101, Budget(100), 1),
            Err(BidError::InvalidAmount)
        );
        // Exactly the full budget is allowed.
        w.submit(id, 100, Budget(100), 1).unwrap();
    }

    #[test]
    fn test_bid_after_countdown_expiry_rejected() {
        let mut w = window();
        w.tick();
        w.tick();
        assert_eq!(w.tick(), 0);
        assert!(!w.is_open());

        let err = w.submit(ParticipantId::random(), 5, Budget(100), 99);
        assert_eq!(err, Err(BidError::WindowClosed));
    }

    #[test]
    fn test_bid_after_close_rejected() {
        let mut w = window();
        w.close();
        let err = w.submit(ParticipantId::random(), 5, Budget(100), 99);
        assert_eq!(err, Err(BidError::WindowClosed));
    }

    #[test]
    fn test_close_is_idempotent_safe() {
        let mut w = window();
        w.submit(ParticipantId::random(), 5, Budget(100), 1).unwrap();
        assert_eq!(w.close().len(), 1);
        assert!(w.close().is_empty());
    }

    #[test]
    fn test_tick_after_close_stays_zero() {
        let mut w = window();
        w.close();
        assert_eq!(w.tick(), 0);
    }
}
