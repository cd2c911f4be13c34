//! Round resolution: deterministic winner selection from a closed window.
//!
//! Bids are ordered by amount descending with submission timestamp ascending
//! as the tie-break: among equal top bids, the participant who committed
//! first wins. No third-level key exists; equal amount and equal timestamp
//! is an unreachable degeneracy under a monotonic room clock.
//!
//! An empty bid set resolves to `Passed` and the item stays permanently out
//! of circulation; it is never returned to the catalog.

use std::cmp::Reverse;
use std::collections::HashMap;

use types::{Amount, Bid, Item, ParticipantId};

/// Result of resolving one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The item sold; `item.cost` is set to the winning amount.
    Won {
        item: Item,
        winner: ParticipantId,
        amount: Amount,
    },
    /// No bids were submitted; the item leaves circulation unsold.
    Passed { item: Item },
}

/// Compute the winner (or no-winner) for a closed window's bid set.
///
/// Budget and roster mutation is applied by the room against the registry;
/// this function only decides and stamps the sale price.
pub fn resolve(bids: HashMap<ParticipantId, Bid>, mut item: Item) -> Outcome {
    let mut entries: Vec<(ParticipantId, Bid)> = bids.into_iter().collect();
    entries.sort_by_key(|(_, bid)| (Reverse(bid.amount), bid.at));

    match entries.into_iter().next() {
        Some((winner, bid)) => {
            item.cost = Some(bid.amount);
            Outcome::Won {
                item,
                winner,
                amount: bid.amount,
            }
        }
        None => Outcome::Passed { item },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ItemId;

    fn item() -> Item {
        Item::new(ItemId(1), "Patrick Mahomes", "QB")
    }

    fn bids(entries: &[(ParticipantId, Amount, u64)]) -> HashMap<ParticipantId, Bid> {
        entries
            .iter()
            .map(|&(id, amount, at)| (id, Bid { amount, at }))
            .collect()
    }

    #[test]
    fn test_strictly_greatest_amount_wins() {
        let a = ParticipantId::random();
        let b = ParticipantId::random();
        let outcome = resolve(bids(&[(a, 40, 1), (b, 60, 2)]), item());

        match outcome {
            Outcome::Won { winner, amount, .. } => {
                assert_eq!(winner, b);
                assert_eq!(amount, 60);
            }
            Outcome::Passed { .. } => panic!("expected a winner"),
        }
    }

    #[test]
    fn test_tie_broken_by_earliest_timestamp() {
        let a = ParticipantId::random();
        let b = ParticipantId::random();
        let outcome = resolve(bids(&[(a, 50, 10), (b, 50, 5)]), item());

        match outcome {
            Outcome::Won { winner, .. } => assert_eq!(winner, b),
            Outcome::Passed { .. } => panic!("expected a winner"),
        }
    }

    #[test]
    fn test_earlier_low_bid_does_not_beat_later_high_bid() {
        let a = ParticipantId::random();
        let b = ParticipantId::random();
        let outcome = resolve(bids(&[(a, 30, 1), (b, 31, 100)]), item());

        match outcome {
            Outcome::Won { winner, amount, .. } => {
                assert_eq!(winner, b);
                assert_eq!(amount, 31);
            }
            Outcome::Passed { .. } => panic!("expected a winner"),
        }
    }

    #[test]
    fn test_empty_bid_set_passes() {
        let outcome = resolve(HashMap::new(), item());
        match outcome {
            Outcome::Passed { item } => assert_eq!(item.cost, None),
            Outcome::Won { .. } => panic!("expected no winner"),
        }
    }

    #[test]
    fn test_winning_item_stamped_with_cost() {
        let a = ParticipantId::random();
        let outcome = resolve(bids(&[(a, 17, 3)]), item());
        match outcome {
            Outcome::Won { item, .. } => assert_eq!(item.cost, Some(17)),
            Outcome::Passed { .. } => panic!("expected a winner"),
        }
    }
}
