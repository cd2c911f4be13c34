//! Participant registry: admission control, seats, removal.
//!
//! Seat indices ascend from 0 and are never reused within a room's lifetime;
//! removal leaves a gap, and turn rotation skips vacated seats. Phase-based
//! admission rules live in the room; the registry only enforces capacity and
//! identity uniqueness.

use types::{Budget, Participant, ParticipantId, Seat};

use crate::error::AdmissionError;

/// Mapping from connection identity to participant record.
#[derive(Debug, Clone)]
pub struct Registry {
    capacity: usize,
    initial_budget: Budget,
    // Ordered by seat; seats are unique and ascending.
    participants: Vec<Participant>,
    next_seat: usize,
}

impl Registry {
    /// Create an empty registry for a room of `capacity` seats.
    pub fn new(capacity: usize, initial_budget: Budget) -> Self {
        Self {
            capacity,
            initial_budget,
            participants: Vec::with_capacity(capacity),
            next_seat: 0,
        }
    }

    /// Admit a connection, assigning the next free seat and a full budget.
    pub fn admit(
        &mut self,
        id: ParticipantId,
        name: impl Into<String>,
    ) -> Result<&Participant, AdmissionError> {
        if self.participants.len() >= self.capacity {
            return Err(AdmissionError::RoomFull);
        }
        if self.get(id).is_some() {
            return Err(AdmissionError::AlreadyAdmitted);
        }

        let seat = Seat(self.next_seat);
        self.next_seat += 1;
        let idx = self.participants.len();
        self.participants
            .push(Participant::new(id, name, self.initial_budget, seat));
        Ok(&self.participants[idx])
    }

    /// Remove a participant, leaving their seat vacant.
    pub fn remove(&mut self, id: ParticipantId) -> Option<Participant> {
        let idx = self.participants.iter().position(|p| p.id == id)?;
        Some(self.participants.remove(idx))
    }

    /// Look up by connection identity.
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Mutable lookup by connection identity (used by round resolution).
    pub fn get_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    /// Look up the holder of a seat, if it is occupied.
    pub fn by_seat(&self, seat: Seat) -> Option<&Participant> {
        self.participants.iter().find(|p| p.seat == seat)
    }

    /// Whether a seat currently has a holder.
    pub fn is_seat_occupied(&self, seat: Seat) -> bool {
        self.by_seat(seat).is_some()
    }

    /// Current participants in seat order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Current size.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Whether the room reached capacity.
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.capacity
    }

    /// Fixed participant count required to start.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::new(2, Budget(100))
    }

    #[test]
    fn test_admit_assigns_ascending_seats_and_budget() {
        let mut reg = registry();
        let a = ParticipantId::random();
        let b = ParticipantId::random();

        let seat_a = reg.admit(a, "alice").unwrap().seat;
        let seat_b = reg.admit(b, "bob").unwrap().seat;

        assert_eq!(seat_a, Seat(0));
        assert_eq!(seat_b, Seat(1));
        assert_eq!(reg.get(a).unwrap().budget, Budget(100));
        assert!(reg.is_full());
    }

    #[test]
    fn test_over_capacity_admission_fails() {
        let mut reg = registry();
        reg.admit(ParticipantId::random(), "alice").unwrap();
        reg.admit(ParticipantId::random(), "bob").unwrap();

        let err = reg.admit(ParticipantId::random(), "carol").unwrap_err();
        assert_eq!(err, AdmissionError::RoomFull);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_duplicate_identity_rejected() {
        let mut reg = registry();
        let id = ParticipantId::random();
        reg.admit(id, "alice").unwrap();
        assert_eq!(reg.admit(id, "alice2"), Err(AdmissionError::AlreadyAdmitted));
    }

    #[test]
    fn test_seats_not_reused_after_removal() {
        let mut reg = Registry::new(3, Budget(100));
        let a = ParticipantId::random();
        reg.admit(a, "alice").unwrap();
        reg.admit(ParticipantId::random(), "bob").unwrap();

        reg.remove(a).unwrap();
        assert!(!reg.is_seat_occupied(Seat(0)));

        // The next admission gets a fresh seat, not the vacated one.
        let c = reg.admit(ParticipantId::random(), "carol").unwrap();
        assert_eq!(c.seat, Seat(2));
    }

    #[test]
    fn test_remove_unknown_is_none() {
        let mut reg = registry();
        assert!(reg.remove(ParticipantId::random()).is_none());
    }

    #[test]
    fn test_participants_in_seat_order() {
        let mut reg = registry();
        reg.admit(ParticipantId::random(), "alice").unwrap();
        reg.admit(ParticipantId::random(), "bob").unwrap();
        let names: Vec<_> = reg.participants().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["alice", "bob"]);
    }
}
