//! Per-player board snapshots.
//!
//! A `PlayerSnapshot` combines the chain's scalar fields (life, sizes,
//! commitments) with the four resolved card collections. Snapshots are
//! rebuilt every poll cycle and never persisted. Collections are `im`
//! vectors so handing a snapshot to the renderer is an O(1) clone.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::view::PlayerBackendView;
use crate::cards::{Card, CardCache};
use crate::chain::{ChainPlayer, Commitment};
use crate::core::{Address, CardRef, ObjectId};

/// The four per-player card collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Hand,
    Deck,
    Board,
    Graveyard,
}

impl Zone {
    /// All zones.
    pub const ALL: [Zone; 4] = [Zone::Hand, Zone::Deck, Zone::Board, Zone::Graveyard];
}

/// Per-player view rebuilt each poll cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub address: Address,
    pub record_id: ObjectId,
    pub life: u64,
    pub deck_commitment: Commitment,
    pub hand_commitment: Commitment,
    pub deck_size: u64,
    pub hand_size: u64,
    pub hand: Vector<Card>,
    pub deck: Vector<Card>,
    pub board: Vector<Card>,
    pub graveyard: Vector<Card>,
}

impl PlayerSnapshot {
    /// Build a snapshot from chain fields and backend lists, resolving
    /// every collection through `cache`.
    ///
    /// Hand and deck come from the backend view (normalized so no card sits
    /// in both); board and graveyard from the chain.
    pub fn build(chain: &ChainPlayer, view: &PlayerBackendView, cache: &mut CardCache) -> Self {
        let view = view.clone().normalized();
        Self {
            address: view.address.clone(),
            record_id: chain.record_id.clone(),
            life: chain.life,
            deck_commitment: chain.deck_commitment.clone(),
            hand_commitment: chain.hand_commitment.clone(),
            deck_size: chain.deck_size,
            hand_size: chain.hand_size,
            hand: cache.reconcile(&view.hand).into(),
            deck: cache.reconcile(&view.deck).into(),
            board: cache.reconcile(&chain.board).into(),
            graveyard: cache.reconcile(&chain.graveyard).into(),
        }
    }

    /// Cards in a zone.
    #[must_use]
    pub fn zone(&self, zone: Zone) -> &Vector<Card> {
        match zone {
            Zone::Hand => &self.hand,
            Zone::Deck => &self.deck,
            Zone::Board => &self.board,
            Zone::Graveyard => &self.graveyard,
        }
    }

    /// Zone holding `card`, if any.
    #[must_use]
    pub fn locate(&self, card: &CardRef) -> Option<Zone> {
        Zone::ALL
            .into_iter()
            .find(|zone| self.zone(*zone).iter().any(|c| c.id == *card))
    }

    /// Reduce to the address + hand/deck identifiers projection.
    #[must_use]
    pub fn backend_view(&self) -> PlayerBackendView {
        PlayerBackendView {
            address: self.address.clone(),
            hand: self.hand.iter().map(|card| card.id.clone()).collect(),
            deck: self.deck.iter().map(|card| card.id.clone()).collect(),
        }
    }
}

/// Every identifier a cycle's inputs reference, for cache eviction.
#[must_use]
pub fn referenced_ids<'a>(
    players: impl IntoIterator<Item = (&'a ChainPlayer, &'a PlayerBackendView)>,
) -> FxHashSet<CardRef> {
    let mut live = FxHashSet::default();
    for (chain, view) in players {
        live.extend(chain.board.iter().cloned());
        live.extend(chain.graveyard.iter().cloned());
        live.extend(view.hand.iter().cloned());
        live.extend(view.deck.iter().cloned());
    }
    live
}
