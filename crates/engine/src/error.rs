//! Domain rejection types.
//!
//! These are rejections surfaced to the requesting participant only; none of
//! them terminates the room or escapes the engine. The display text is what
//! goes over the wire in the rejection notice.

use std::fmt;

/// Why a join request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionError {
    /// The room already holds `capacity` participants.
    RoomFull,
    /// The room has left the `waiting` phase.
    PhaseClosed,
    /// This connection already joined.
    AlreadyAdmitted,
}

impl fmt::Display for AdmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmissionError::RoomFull => write!(f, "room is full"),
            AdmissionError::PhaseClosed => write!(f, "room is no longer accepting participants"),
            AdmissionError::AlreadyAdmitted => write!(f, "already joined"),
        }
    }
}

impl std::error::Error for AdmissionError {}

/// Why a bid was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidError {
    /// The countdown reached zero or the window was closed.
    WindowClosed,
    /// Amount below 1 or above the bidder's current budget.
    InvalidAmount,
}

impl fmt::Display for BidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidError::WindowClosed => write!(f, "bidding window is closed"),
            BidError::InvalidAmount => write!(f, "bid must be between 1 and your remaining budget"),
        }
    }
}

impl std::error::Error for BidError {}

/// Why a nomination was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NominateError {
    /// The sender does not hold the current nomination turn.
    NotCurrentNominator,
    /// The item is not in the available set (sold or never existed).
    ItemUnavailable,
    /// A bidding window is already open for this round.
    RoundInProgress,
}

impl fmt::Display for NominateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NominateError::NotCurrentNominator => write!(f, "it is not your turn to nominate"),
            NominateError::ItemUnavailable => write!(f, "item is not available"),
            NominateError::RoundInProgress => write!(f, "a round is already in progress"),
        }
    }
}

impl std::error::Error for NominateError {}
