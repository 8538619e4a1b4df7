//! Card-click interpretation.
//!
//! What a click means depends on the active phase:
//! - `Discard`: discard the clicked hand card
//! - `Play`: play the clicked hand card
//! - `Attack`: add a board card to the attacker selection when it sits on
//!   the acting player's board, or to the defender selection when it sits
//!   on the opponent's board
//!
//! Anything else is ignored, including Attack-phase clicks on cards that
//! are on neither board.

use serde::{Deserialize, Serialize};

use super::phase::TurnPhase;
use crate::core::{CardRef, Seat, SeatMap};
use crate::zones::{PlayerSnapshot, Zone};

/// What a click asks for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClickIntent {
    Discard(CardRef),
    Play(CardRef),
    SelectAttacker(CardRef),
    SelectDefender(CardRef),
    Ignore,
}

/// Interpret a click on `card` for the `acting` seat.
#[must_use]
pub fn interpret_click(
    phase: TurnPhase,
    card: &CardRef,
    acting: Seat,
    players: &SeatMap<PlayerSnapshot>,
) -> ClickIntent {
    let own = &players[acting];
    match phase {
        TurnPhase::Discard if own.locate(card) == Some(Zone::Hand) => ClickIntent::Discard(card.clone()),
        TurnPhase::Play if own.locate(card) == Some(Zone::Hand) => ClickIntent::Play(card.clone()),
        TurnPhase::Attack => {
            if own.locate(card) == Some(Zone::Board) {
                ClickIntent::SelectAttacker(card.clone())
            } else if players[acting.opponent()].locate(card) == Some(Zone::Board) {
                ClickIntent::SelectDefender(card.clone())
            } else {
                ClickIntent::Ignore
            }
        }
        _ => ClickIntent::Ignore,
    }
}

/// Attackers and defenders picked during the Attack phase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackSelection {
    pub attackers: Vec<CardRef>,
    pub defenders: Vec<CardRef>,
}

impl AttackSelection {
    /// Record a selection intent. Returns `false` for non-selection intents
    /// and for cards already selected.
    pub fn apply(&mut self, intent: &ClickIntent) -> bool {
        let (list, card) = match intent {
            ClickIntent::SelectAttacker(card) => (&mut self.attackers, card),
            ClickIntent::SelectDefender(card) => (&mut self.defenders, card),
            _ => return false,
        };
        if list.contains(card) {
            return false;
        }
        list.push(card.clone());
        true
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attackers.is_empty() && self.defenders.is_empty()
    }

    /// Clear both selections.
    pub fn clear(&mut self) {
        self.attackers.clear();
        self.defenders.clear();
    }
}
