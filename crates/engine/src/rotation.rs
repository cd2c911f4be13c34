//! Turn rotation: a deterministic round-robin cursor over held seats.
//!
//! The cursor walks an explicit seat list, not the raw range `0..capacity`:
//! waiting-phase churn can leave gaps (a vacated seat is never reused), so
//! the room rebuilds the rotation from the seats actually held the moment
//! the auction starts. `advance` moves exactly once per resolved round,
//! skipping seats vacated since; if every seat is vacant it returns `None`,
//! which the room treats as a fatal abort condition.

use types::Seat;

/// Round-robin cursor over an ordered seat list.
#[derive(Debug, Clone)]
pub struct Rotation {
    seats: Vec<Seat>,
    cursor: usize,
}

impl Rotation {
    /// Build a rotation over `seats`, starting at the first one.
    ///
    /// The list is expected in seat order; an empty list yields a rotation
    /// with no current seat.
    pub fn over(seats: Vec<Seat>) -> Self {
        Self { seats, cursor: 0 }
    }

    /// The seat whose nomination is currently awaited.
    ///
    /// Idempotent and side-effect-free. `None` only for an empty rotation.
    pub fn current(&self) -> Option<Seat> {
        self.seats.get(self.cursor).copied()
    }

    /// Move the cursor to the next occupied seat in the list.
    ///
    /// `occupied` reports whether a seat still has a holder. Returns the new
    /// seat, or `None` when every seat is vacant.
    pub fn advance<F>(&mut self, occupied: F) -> Option<Seat>
    where
        F: Fn(Seat) -> bool,
    {
        let n = self.seats.len();
        for step in 1..=n {
            let idx = (self.cursor + step) % n;
            if occupied(self.seats[idx]) {
                self.cursor = idx;
                return Some(self.seats[idx]);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contiguous(n: usize) -> Vec<Seat> {
        (0..n).map(Seat).collect()
    }

    #[test]
    fn test_current_is_idempotent() {
        let rot = Rotation::over(contiguous(3));
        assert_eq!(rot.current(), Some(Seat(0)));
        assert_eq!(rot.current(), Some(Seat(0)));
    }

    #[test]
    fn test_advance_wraps_around() {
        let mut rot = Rotation::over(contiguous(2));
        assert_eq!(rot.advance(|_| true), Some(Seat(1)));
        assert_eq!(rot.advance(|_| true), Some(Seat(0)));
        assert_eq!(rot.advance(|_| true), Some(Seat(1)));
    }

    #[test]
    fn test_advance_skips_vacated_seats() {
        let mut rot = Rotation::over(contiguous(3));
        // Seat 1 vacated; 0 -> 2.
        assert_eq!(rot.advance(|s| s != Seat(1)), Some(Seat(2)));
        // 2 -> 0, still skipping 1.
        assert_eq!(rot.advance(|s| s != Seat(1)), Some(Seat(0)));
    }

    #[test]
    fn test_all_vacant_is_none() {
        let mut rot = Rotation::over(contiguous(3));
        assert_eq!(rot.advance(|_| false), None);
        // Cursor unchanged on failure.
        assert_eq!(rot.current(), Some(Seat(0)));
    }

    #[test]
    fn test_gapped_seat_list_visits_only_held_seats() {
        // Seat 0 was vacated before the auction started and never reused;
        // the rotation was built over the seats actually held.
        let mut rot = Rotation::over(vec![Seat(1), Seat(2)]);
        assert_eq!(rot.current(), Some(Seat(1)));
        assert_eq!(rot.advance(|_| true), Some(Seat(2)));
        assert_eq!(rot.advance(|_| true), Some(Seat(1)));
    }

    #[test]
    fn test_empty_rotation_has_no_current_seat() {
        let mut rot = Rotation::over(Vec::new());
        assert_eq!(rot.current(), None);
        assert_eq!(rot.advance(|_| true), None);
    }
}
