//! Turn/phase state machine.
//!
//! A local turn runs `Idle → Draw → (Discard) → Play → Attack → Idle`.
//! The state is a tagged variant; every change goes through the single
//! [`transition`] function, which maps `(local seat, state, event)` to the
//! next state plus at most one command for the caller to dispatch.
//!
//! ## Rules
//!
//! - Only an `Evaluate` in `Idle` with the local seat active and the turn
//!   not yet spent starts a draw. Every other state ignores `Evaluate`, so
//!   re-evaluating on every poll never fires a second draw.
//! - `Draw` resolves to `Discard` exactly when the draw reported a required
//!   discard, otherwise to `Play`.
//! - `Attack` returns to `Idle` (turn spent, still ours) when the attack
//!   completes. Ownership only moves on a confirmed end-turn or when the
//!   chain reports a different turn owner.

use serde::{Deserialize, Serialize};

use crate::core::Seat;

/// Which sub-phase the local player is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    Idle,
    Draw,
    Discard,
    Play,
    Attack,
}

/// Full turn state.
///
/// `Draw` through `Attack` only occur while the local seat is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting: either the opponent's turn, or ours before the draw
    /// (`spent == false`) or after the attack (`spent == true`).
    Idle { active: Seat, spent: bool },
    /// Draw submitted, awaiting its result.
    Draw,
    /// Hand at its limit; a discard is required.
    Discard,
    /// Waiting for a card to be played.
    Play,
    /// Selecting attackers and defenders.
    Attack,
}

impl TurnState {
    /// Start of a game: player 1 moves first.
    #[must_use]
    pub const fn initial() -> Self {
        TurnState::Idle {
            active: Seat::One,
            spent: false,
        }
    }

    /// Phase tag of this state.
    #[must_use]
    pub const fn phase(self) -> TurnPhase {
        match self {
            TurnState::Idle { .. } => TurnPhase::Idle,
            TurnState::Draw => TurnPhase::Draw,
            TurnState::Discard => TurnPhase::Discard,
            TurnState::Play => TurnPhase::Play,
            TurnState::Attack => TurnPhase::Attack,
        }
    }

    /// Seat whose turn it is.
    #[must_use]
    pub const fn active(self, local: Seat) -> Seat {
        match self {
            TurnState::Idle { active, .. } => active,
            _ => local,
        }
    }
}

/// Inputs to the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnEvent {
    /// Re-check guards (sent once per poll tick).
    Evaluate,
    /// The draw transaction finished.
    DrawCompleted { discard_required: bool },
    /// The discard transaction finished.
    DiscardCompleted,
    /// The play transaction finished.
    PlayCompleted,
    /// The attack transaction finished.
    AttackCompleted,
    /// The in-flight action for the current phase failed.
    ActionFailed,
    /// The end-turn transaction finished.
    EndTurnCompleted,
    /// The chain reports this seat as the turn owner.
    TurnObserved(Seat),
}

/// Side effect requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnCommand {
    /// Submit a draw for the local player.
    Draw,
}

/// Result of one transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: TurnState,
    pub command: Option<TurnCommand>,
}

impl Transition {
    const fn to(next: TurnState) -> Self {
        Self { next, command: None }
    }
}

/// The transition function.
///
/// ```
/// use card_duel_client::core::Seat;
/// use card_duel_client::turn::{transition, TurnCommand, TurnEvent, TurnState};
///
/// let t = transition(Seat::One, TurnState::initial(), TurnEvent::Evaluate);
/// assert_eq!(t.next, TurnState::Draw);
/// assert_eq!(t.command, Some(TurnCommand::Draw));
///
/// // Re-evaluating while the draw is in flight does nothing.
/// let again = transition(Seat::One, t.next, TurnEvent::Evaluate);
/// assert_eq!(again.next, TurnState::Draw);
/// assert_eq!(again.command, None);
/// ```
#[must_use]
pub fn transition(local: Seat, state: TurnState, event: TurnEvent) -> Transition {
    use TurnEvent as E;
    use TurnState as S;

    match (state, event) {
        (S::Idle { active, spent: false }, E::Evaluate) if active == local => Transition {
            next: S::Draw,
            command: Some(TurnCommand::Draw),
        },

        (S::Draw, E::DrawCompleted { discard_required: true }) => Transition::to(S::Discard),
        (S::Draw, E::DrawCompleted { discard_required: false }) => Transition::to(S::Play),
        (S::Draw, E::ActionFailed) => Transition::to(S::Idle {
            active: local,
            spent: false,
        }),

        (S::Discard, E::DiscardCompleted) => Transition::to(S::Play),
        (S::Play, E::PlayCompleted) => Transition::to(S::Attack),
        (S::Attack, E::AttackCompleted) => Transition::to(S::Idle {
            active: local,
            spent: true,
        }),

        (S::Idle { active, .. }, E::EndTurnCompleted) if active == local => {
            Transition::to(S::Idle {
                active: local.opponent(),
                spent: false,
            })
        }
        (S::Play | S::Attack, E::EndTurnCompleted) => Transition::to(S::Idle {
            active: local.opponent(),
            spent: false,
        }),

        (S::Idle { active, .. }, E::TurnObserved(seat)) if seat != active => {
            Transition::to(S::Idle {
                active: seat,
                spent: false,
            })
        }
        (S::Draw | S::Discard | S::Play | S::Attack, E::TurnObserved(seat)) if seat != local => {
            Transition::to(S::Idle {
                active: seat,
                spent: false,
            })
        }

        (unchanged, _) => Transition::to(unchanged),
    }
}
