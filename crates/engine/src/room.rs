//! Session state machine: the single-use auction room.
//!
//! The room composes the registry, rotation, catalog, and per-round bidding
//! window, and is the only component with externally observable phase
//! transitions. All mutation flows through [`Room::handle`]; the caller is
//! expected to invoke it from exactly one task, which is what serializes
//! client-driven and timer-driven events into one total order.
//!
//! # Round sequence numbers
//!
//! Timer events (`Tick`, `NominationDue`) are stamped with the round they
//! were scheduled for. The room bumps its round counter whenever a window
//! resolves or the room aborts, so ticks and prompts queued for a dead round
//! are inert when they drain. Canceling a countdown twice is therefore a
//! no-op by construction.

use catalog::Catalog;
use tracing::{debug, info, warn};
use types::{Amount, Budget, ItemId, ParticipantId, Phase, Timestamp};

use crate::error::{AdmissionError, BidError, NominateError};
use crate::events::{Effect, Event, ParticipantSummary, ServerMessage};
use crate::registry::Registry;
use crate::resolve::{resolve, Outcome};
use crate::rotation::Rotation;
use crate::window::Window;

/// Tunables fixed for the room's lifetime.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Participant count required to start (and to keep running).
    pub capacity: usize,
    /// Starting funds for every participant.
    pub initial_budget: Budget,
    /// Bidding window length in seconds.
    pub countdown_secs: u64,
    /// Delay between the room filling and the first nomination prompt.
    pub room_start_delay_ms: u64,
    /// Delay between a round's outcome and the next nomination prompt.
    pub nomination_delay_ms: u64,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            capacity: 2,
            initial_budget: Budget(100),
            countdown_secs: 30,
            room_start_delay_ms: 2_000,
            nomination_delay_ms: 2_000,
        }
    }
}

/// One complete auction session instance.
#[derive(Debug)]
pub struct Room {
    config: RoomConfig,
    phase: Phase,
    registry: Registry,
    rotation: Rotation,
    catalog: Catalog,
    // Non-absent iff phase is Auction and a nomination has been accepted.
    window: Option<Window>,
    round: u64,
}

impl Room {
    /// Create a room in the `waiting` phase over the given catalog.
    pub fn new(config: RoomConfig, catalog: Catalog) -> Self {
        let registry = Registry::new(config.capacity, config.initial_budget);
        Self {
            config,
            phase: Phase::Waiting,
            registry,
            // Rebuilt from the held seats when the room fills; waiting-phase
            // churn can leave gaps below the last assigned seat.
            rotation: Rotation::over(Vec::new()),
            catalog,
            window: None,
            round: 0,
        }
    }

    /// The single serialized event-handling entry point.
    ///
    /// `now` is the room clock in milliseconds, used as the bid submission
    /// timestamp. Malformed or ill-timed events degrade to a no-op plus a
    /// private rejection; nothing here panics on external input.
    pub fn handle(&mut self, event: Event, now: Timestamp) -> Vec<Effect> {
        if self.phase.is_terminal() {
            return self.handle_terminal(event);
        }
        match event {
            Event::Join { id, name } => self.on_join(id, name),
            Event::Nominate { id, item_id } => self.on_nominate(id, item_id),
            Event::Bid { id, amount } => self.on_bid(id, amount, now),
            Event::Disconnect { id } => self.on_disconnect(id),
            Event::Tick { round } => self.on_tick(round),
            Event::NominationDue { round } => self.on_nomination_due(round),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Status accessors (read-only, for the REST surface)
    // ─────────────────────────────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current participant count.
    pub fn participant_count(&self) -> usize {
        self.registry.len()
    }

    /// Fixed room capacity.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Items still available for nomination.
    pub fn items_remaining(&self) -> usize {
        self.catalog.len()
    }

    /// The available items themselves, in catalog order.
    pub fn available_items(&self) -> &[types::Item] {
        self.catalog.all_available()
    }

    /// Public view of all participants in seat order.
    pub fn summaries(&self) -> Vec<ParticipantSummary> {
        self.registry
            .participants()
            .iter()
            .map(ParticipantSummary::from)
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Event handlers
    // ─────────────────────────────────────────────────────────────────────

    fn handle_terminal(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Join { id, .. } => vec![Effect::Unicast(
                id,
                ServerMessage::JoinRejected {
                    reason: AdmissionError::PhaseClosed.to_string(),
                },
            )],
            // The room is already dead, but membership changes still notify.
            Event::Disconnect { id } => match self.registry.remove(id) {
                Some(removed) => {
                    debug!(name = %removed.name, "participant left after room end");
                    vec![Effect::Broadcast(ServerMessage::CountChanged {
                        count: self.registry.len(),
                        capacity: self.config.capacity,
                    })]
                }
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn on_join(&mut self, id: ParticipantId, name: String) -> Vec<Effect> {
        if self.phase != Phase::Waiting {
            return vec![Effect::Unicast(
                id,
                ServerMessage::JoinRejected {
                    reason: AdmissionError::PhaseClosed.to_string(),
                },
            )];
        }

        let name = match self.registry.admit(id, name) {
            Ok(p) => p.name.clone(),
            Err(e) => {
                debug!(%id, error = %e, "join rejected");
                return vec![Effect::Unicast(
                    id,
                    ServerMessage::JoinRejected {
                        reason: e.to_string(),
                    },
                )];
            }
        };

        let count = self.registry.len();
        let capacity = self.config.capacity;
        info!(%name, count, capacity, "participant joined");

        let mut effects = vec![
            Effect::Unicast(
                id,
                ServerMessage::Joined {
                    name,
                    count,
                    capacity,
                },
            ),
            Effect::Broadcast(ServerMessage::CountChanged { count, capacity }),
        ];

        if self.registry.is_full() {
            self.phase = Phase::Auction;
            // Seats are never reused, so the held set may not be 0..capacity;
            // the rotation must walk the seats that exist now.
            self.rotation =
                Rotation::over(self.registry.participants().iter().map(|p| p.seat).collect());
            info!(capacity, "room full, auction starting");
            effects.push(Effect::Broadcast(ServerMessage::RoomStarted {
                participants: self.summaries(),
            }));
            effects.push(Effect::Schedule {
                after_ms: self.config.room_start_delay_ms,
                event: Event::NominationDue { round: self.round },
            });
        }

        effects
    }

    fn on_nominate(&mut self, id: ParticipantId, item_id: ItemId) -> Vec<Effect> {
        if self.phase != Phase::Auction {
            debug!(%id, "nomination outside auction phase ignored");
            return Vec::new();
        }
        let Some(sender) = self.registry.get(id) else {
            return Vec::new();
        };

        let rejection = if self.window.is_some() {
            Some(NominateError::RoundInProgress)
        } else if self.rotation.current() != Some(sender.seat) {
            Some(NominateError::NotCurrentNominator)
        } else if !self.catalog.contains(item_id) {
            Some(NominateError::ItemUnavailable)
        } else {
            None
        };
        if let Some(e) = rejection {
            debug!(%id, %item_id, error = %e, "nomination rejected");
            return vec![Effect::Unicast(
                id,
                ServerMessage::NominationRejected {
                    reason: e.to_string(),
                },
            )];
        }

        // Single point of sale: the item leaves availability here and never
        // returns, even if the round ends with no bids.
        let item = match self.catalog.take(item_id) {
            Ok(item) => item,
            Err(_) => {
                return vec![Effect::Unicast(
                    id,
                    ServerMessage::NominationRejected {
                        reason: NominateError::ItemUnavailable.to_string(),
                    },
                )];
            }
        };

        let seconds = self.config.countdown_secs;
        info!(item = %item.name, seconds, round = self.round, "bidding window opened");
        self.window = Some(Window::open(item.clone(), seconds));

        vec![
            Effect::Broadcast(ServerMessage::WindowOpened { item, seconds }),
            Effect::StartTicker { round: self.round },
        ]
    }

    fn on_bid(&mut self, id: ParticipantId, amount: Amount, now: Timestamp) -> Vec<Effect> {
        let Some(participant) = self.registry.get(id) else {
            return Vec::new();
        };
        let budget = participant.budget;

        let Some(window) = self.window.as_mut() else {
            return vec![Effect::Unicast(
                id,
                ServerMessage::BidRejected {
                    reason: BidError::WindowClosed.to_string(),
                },
            )];
        };

        match window.submit(id, amount, budget, now) {
            Ok(()) => {
                debug!(%id, amount, at = now, "bid recorded");
                let mut effects = vec![Effect::Unicast(
                    id,
                    ServerMessage::BidAccepted { amount },
                )];
                // Early resolution: every participant has committed a bid,
                // so waiting out the clock reveals nothing further.
                if window.bid_count() == self.registry.len() {
                    info!(round = self.round, "all bids in, resolving early");
                    self.close_round(&mut effects);
                }
                effects
            }
            Err(e) => {
                debug!(%id, amount, error = %e, "bid rejected");
                vec![Effect::Unicast(
                    id,
                    ServerMessage::BidRejected {
                        reason: e.to_string(),
                    },
                )]
            }
        }
    }

    fn on_tick(&mut self, round: u64) -> Vec<Effect> {
        if self.phase != Phase::Auction || round != self.round {
            return Vec::new();
        }
        let Some(window) = self.window.as_mut() else {
            return Vec::new();
        };

        let remaining = window.tick();
        if remaining > 0 {
            return vec![Effect::Broadcast(ServerMessage::Countdown { remaining })];
        }

        let mut effects = Vec::new();
        self.close_round(&mut effects);
        effects
    }

    fn on_nomination_due(&mut self, round: u64) -> Vec<Effect> {
        if self.phase != Phase::Auction || round != self.round || self.window.is_some() {
            return Vec::new();
        }

        let nominator = self
            .rotation
            .current()
            .and_then(|seat| self.registry.by_seat(seat));
        let Some(nominator) = nominator else {
            // The rotation is built from held seats at auction start, so this
            // only fires if a disconnect slipped past the abort path.
            let mut effects = Vec::new();
            self.abort(&mut effects, "nominator seat is vacant".to_string());
            return effects;
        };
        let nominator_id = nominator.id;
        let nominator_name = nominator.name.clone();
        let seat = nominator.seat;
        debug!(nominator = %nominator_name, %seat, "requesting nomination");

        let mut effects = vec![Effect::Unicast(
            nominator_id,
            ServerMessage::NominationRequest {
                items: self.catalog.all_available().to_vec(),
            },
        )];
        for p in self.registry.participants() {
            if p.id != nominator_id {
                effects.push(Effect::Unicast(
                    p.id,
                    ServerMessage::NominationWait {
                        nominator: nominator_name.clone(),
                    },
                ));
            }
        }
        effects
    }

    fn on_disconnect(&mut self, id: ParticipantId) -> Vec<Effect> {
        let Some(removed) = self.registry.remove(id) else {
            // A connection that never joined closed; nothing to do.
            return Vec::new();
        };
        info!(name = %removed.name, phase = %self.phase, "participant disconnected");

        let mut effects = vec![Effect::Broadcast(ServerMessage::CountChanged {
            count: self.registry.len(),
            capacity: self.config.capacity,
        })];

        if self.phase == Phase::Auction && self.registry.len() < self.config.capacity {
            self.abort(&mut effects, format!("{} disconnected", removed.name));
        }

        effects
    }

    // ─────────────────────────────────────────────────────────────────────
    // Round lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Close the active window, resolve it, and set up the next phase.
    fn close_round(&mut self, effects: &mut Vec<Effect>) {
        effects.push(Effect::StopTicker);
        let Some(mut window) = self.window.take() else {
            return;
        };
        let bids = window.close();
        let item = window.into_item();

        match resolve(bids, item) {
            Outcome::Won {
                item,
                winner,
                amount,
            } => {
                if let Some(p) = self.registry.get_mut(winner) {
                    p.budget = p.budget.saturating_sub(amount);
                    p.acquired.push(item.clone());
                    info!(
                        item = %item.name,
                        winner = %p.name,
                        amount,
                        budget_left = %p.budget,
                        "round won"
                    );
                    effects.push(Effect::Broadcast(ServerMessage::RoundWon {
                        item,
                        winner: p.name.clone(),
                        amount,
                    }));
                }
            }
            Outcome::Passed { item } => {
                info!(item = %item.name, "round passed with no bids");
                effects.push(Effect::Broadcast(ServerMessage::RoundPassed { item }));
            }
        }

        if self.catalog.is_empty() {
            self.phase = Phase::Complete;
            info!("catalog exhausted, room complete");
            effects.push(Effect::Broadcast(ServerMessage::RoomComplete {
                participants: self.summaries(),
            }));
            return;
        }

        let registry = &self.registry;
        match self.rotation.advance(|s| registry.is_seat_occupied(s)) {
            Some(next) => {
                debug!(%next, "rotation advanced");
                self.round += 1;
                effects.push(Effect::Schedule {
                    after_ms: self.config.nomination_delay_ms,
                    event: Event::NominationDue { round: self.round },
                });
            }
            None => self.abort(effects, "no occupied seats remain".to_string()),
        }
    }

    /// Unrecoverable end: stop the countdown, invalidate queued timer
    /// events, and notify everyone.
    fn abort(&mut self, effects: &mut Vec<Effect>, reason: String) {
        warn!(%reason, "room aborted");
        self.window = None;
        self.round += 1;
        self.phase = Phase::Aborted;
        effects.push(Effect::StopTicker);
        effects.push(Effect::Broadcast(ServerMessage::RoomAborted { reason }));
    }
}
