//! Game creation after a challenge is accepted.
//!
//! The accepting wallet becomes player 2 and the challenger player 1. Each
//! player's deck is the Card objects they own, cut to the configured deck
//! size; the opening hand is then dealt at random from that deck. The
//! result is posted to the backend, which holds the hidden collections for
//! the rest of the game.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::backend::Backend;
use crate::chain::{ChainObject, ChainProvider, Wallet};
use crate::core::{Address, CardRef, ClientConfig, DealRng, ObjectKind};
use crate::error::ClientError;
use crate::zones::{BackendPlayers, PlayerBackendView};

/// Builds the opening backend document for a new game.
#[derive(Clone)]
pub struct GameSetup {
    config: ClientConfig,
    provider: Arc<dyn ChainProvider>,
    wallet: Arc<dyn Wallet>,
    backend: Arc<dyn Backend>,
}

impl std::fmt::Debug for GameSetup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSetup")
            .field("wallet", &self.wallet.address())
            .field("total_deck_size", &self.config.total_deck_size)
            .finish()
    }
}

impl GameSetup {
    pub fn new(
        config: ClientConfig,
        provider: Arc<dyn ChainProvider>,
        wallet: Arc<dyn Wallet>,
        backend: Arc<dyn Backend>,
    ) -> Self {
        Self {
            config,
            provider,
            wallet,
            backend,
        }
    }

    /// Deal both players and post the document. Returns what was posted.
    #[instrument(skip_all, fields(challenger = %challenger))]
    pub async fn create_game(
        &self,
        challenger: &Address,
        rng: &DealRng,
    ) -> Result<BackendPlayers, ClientError> {
        let own_cards = self.wallet.objects().await?;
        let their_cards = self.provider.owned_objects(challenger).await?;

        let mut p1_rng = rng.for_context("player_1");
        let mut p2_rng = rng.for_context("player_2");
        let player_1 = self.opening_view(challenger.clone(), &their_cards, &mut p1_rng);
        let player_2 = self.opening_view(self.wallet.address(), &own_cards, &mut p2_rng);

        info!(
            p1_hand = player_1.hand.len(),
            p1_deck = player_1.deck.len(),
            p2_hand = player_2.hand.len(),
            p2_deck = player_2.deck.len(),
            "dealt opening hands"
        );

        let players = BackendPlayers::new(player_1, player_2);
        self.backend.post_players(&players).await?;
        Ok(players)
    }

    fn opening_view(
        &self,
        address: Address,
        objects: &[ChainObject],
        rng: &mut DealRng,
    ) -> PlayerBackendView {
        let deck = self.card_ids(objects);
        let mut view = PlayerBackendView::new(address).with_deck(deck).normalized();
        view.cut_deck(self.config.total_deck_size);
        view.deal(self.config.max_hand_size, rng);
        view
    }

    fn card_ids(&self, objects: &[ChainObject]) -> Vec<CardRef> {
        objects
            .iter()
            .filter(|object| self.config.classify(&object.object_type) == Some(ObjectKind::Card))
            .map(|object| CardRef::from(object.object_id.clone()))
            .collect()
    }
}
