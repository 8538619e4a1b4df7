//! Stateful wrapper around [`transition`] for one local seat.

use tracing::{debug, info};

use super::phase::{transition, TurnCommand, TurnEvent, TurnPhase, TurnState};
use crate::core::Seat;

/// Turn controller for the local seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnController {
    local: Seat,
    state: TurnState,
}

impl TurnController {
    /// Controller at the start of a game.
    #[must_use]
    pub const fn new(local: Seat) -> Self {
        Self {
            local,
            state: TurnState::initial(),
        }
    }

    /// Controller resumed from a known state.
    #[must_use]
    pub const fn with_state(local: Seat, state: TurnState) -> Self {
        Self { local, state }
    }

    /// Feed one event. Returns the command the caller must dispatch, if any.
    pub fn apply(&mut self, event: TurnEvent) -> Option<TurnCommand> {
        let t = transition(self.local, self.state, event);
        if t.next != self.state {
            info!(
                seat = %self.local,
                from = ?self.state.phase(),
                to = ?t.next.phase(),
                ?event,
                "turn phase changed"
            );
        } else {
            debug!(seat = %self.local, state = ?self.state, ?event, "turn event ignored");
        }
        self.state = t.next;
        t.command
    }

    /// Local seat.
    #[must_use]
    pub const fn local(&self) -> Seat {
        self.local
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> TurnState {
        self.state
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    /// Seat whose turn it is.
    #[must_use]
    pub const fn active(&self) -> Seat {
        self.state.active(self.local)
    }

    /// True while the local seat owns the turn.
    #[must_use]
    pub fn is_local_turn(&self) -> bool {
        self.active() == self.local
    }

    /// End-turn is offered once the draw (and any forced discard) is done.
    #[must_use]
    pub fn can_end_turn(&self) -> bool {
        match self.state {
            TurnState::Idle { active, spent } => active == self.local && spent,
            TurnState::Play | TurnState::Attack => true,
            TurnState::Draw | TurnState::Discard => false,
        }
    }
}
