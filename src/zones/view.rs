//! Backend projections of a player: address plus hand and deck card lists.
//!
//! The companion backend holds the hidden collections (hand and deck) that
//! the chain only commits to. `PlayerBackendView` is that record, and
//! `BackendPlayers` is the `{player_1, player_2}` document exchanged with
//! `/api/get` and `/api/post`.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Address, CardRef, DealRng, Seat, SeatMap};

/// Address + hand/deck identifiers for one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBackendView {
    pub address: Address,
    #[serde(default)]
    pub hand: Vec<CardRef>,
    #[serde(default)]
    pub deck: Vec<CardRef>,
}

impl PlayerBackendView {
    /// Empty view for an address.
    pub fn new(address: impl Into<Address>) -> Self {
        Self {
            address: address.into(),
            hand: Vec::new(),
            deck: Vec::new(),
        }
    }

    /// Set the deck (builder pattern).
    #[must_use]
    pub fn with_deck(mut self, deck: Vec<CardRef>) -> Self {
        self.deck = deck;
        self
    }

    /// Set the hand (builder pattern).
    #[must_use]
    pub fn with_hand(mut self, hand: Vec<CardRef>) -> Self {
        self.hand = hand;
        self
    }

    /// Drop duplicate and empty identifiers, and any deck entry that also
    /// appears in the hand. The hand wins: a card being drawn shows up in
    /// the hand before the deck list catches up.
    ///
    /// ```
    /// use card_duel_client::zones::PlayerBackendView;
    /// use card_duel_client::core::CardRef;
    ///
    /// let view = PlayerBackendView::new("0xA")
    ///     .with_hand(vec![CardRef::new("a"), CardRef::new("a")])
    ///     .with_deck(vec![CardRef::new("a"), CardRef::new("b")])
    ///     .normalized();
    ///
    /// assert_eq!(view.hand, vec![CardRef::new("a")]);
    /// assert_eq!(view.deck, vec![CardRef::new("b")]);
    /// ```
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let mut seen = FxHashSet::default();
        self.hand.retain(|id| !id.is_empty() && seen.insert(id.clone()));
        self.deck.retain(|id| !id.is_empty() && seen.insert(id.clone()));
        self
    }

    /// Truncate the deck to `size` entries.
    pub fn cut_deck(&mut self, size: usize) {
        self.deck.truncate(size);
    }

    /// Move random deck entries into the hand until the hand holds
    /// `hand_size` cards or the deck runs out.
    pub fn deal(&mut self, hand_size: usize, rng: &mut DealRng) {
        while self.hand.len() < hand_size {
            let Some(index) = rng.pick_index(self.deck.len()) else {
                break;
            };
            let card = self.deck.swap_remove(index);
            self.hand.push(card);
        }
    }

    /// Hand size after drawing one card from this view.
    #[must_use]
    pub fn hand_size_after_draw(&self) -> usize {
        self.hand.len() + usize::from(!self.deck.is_empty())
    }
}

/// The document exchanged with the companion backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendPlayers {
    pub player_1: PlayerBackendView,
    pub player_2: PlayerBackendView,
}

impl BackendPlayers {
    /// Pair two views.
    #[must_use]
    pub fn new(player_1: PlayerBackendView, player_2: PlayerBackendView) -> Self {
        Self { player_1, player_2 }
    }

    /// View for a seat.
    #[must_use]
    pub fn seat(&self, seat: Seat) -> &PlayerBackendView {
        match seat {
            Seat::One => &self.player_1,
            Seat::Two => &self.player_2,
        }
    }

    /// Seat occupied by `address`, preferring player 1 when both match.
    #[must_use]
    pub fn seat_of(&self, address: &Address) -> Option<Seat> {
        Seat::ALL
            .into_iter()
            .find(|seat| self.seat(*seat).address == *address)
    }

    /// Split into per-seat views.
    #[must_use]
    pub fn into_seats(self) -> SeatMap<PlayerBackendView> {
        SeatMap::new(self.player_1, self.player_2)
    }
}
