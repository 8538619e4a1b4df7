//! One call per player action.
//!
//! Each method packages the acting player's state into a `card_game` Move
//! call and hands it to the wallet for signing and execution. There is no
//! retry and no local state is touched before the wallet confirms, so a
//! failed call needs no rollback: the error is returned to the caller.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::chain::Wallet;
use crate::core::{CardRef, ClientConfig, MoveArg, MoveCall, ObjectId, Seat, TxReceipt};
use crate::error::ClientError;
use crate::turn::AttackSelection;
use crate::zones::PlayerBackendView;

/// Result of a draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    /// The hand reached the configured limit; a discard must follow.
    pub discard_required: bool,
    pub receipt: TxReceipt,
}

/// Forwards player actions to the wallet.
#[derive(Clone)]
pub struct ActionDispatcher {
    wallet: Arc<dyn Wallet>,
    config: ClientConfig,
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("wallet", &self.wallet.address())
            .finish()
    }
}

impl ActionDispatcher {
    pub fn new(wallet: Arc<dyn Wallet>, config: ClientConfig) -> Self {
        Self { wallet, config }
    }

    fn call(&self, function: &str) -> MoveCall {
        MoveCall::new(self.config.function_target(function))
    }

    async fn submit(&self, call: MoveCall) -> Result<TxReceipt, ClientError> {
        let function = call.function().to_owned();
        let receipt = self.wallet.execute(call).await?;
        info!(function = %function, digest = %receipt.digest, "transaction executed");
        Ok(receipt)
    }

    /// Draw a card for `seat`. `view` is the seat's pre-draw backend view.
    #[instrument(skip_all, fields(game = %game))]
    pub async fn draw(
        &self,
        game: &ObjectId,
        seat: Seat,
        view: &PlayerBackendView,
    ) -> Result<DrawOutcome, ClientError> {
        let call = self
            .call("draw")
            .arg(MoveArg::Object(game.clone()))
            .arg(MoveArg::Bool(seat.is_player_1()))
            .arg(MoveArg::Cards(view.deck.clone()));
        let receipt = self.submit(call).await?;
        Ok(DrawOutcome {
            discard_required: view.hand_size_after_draw() >= self.config.max_hand_size,
            receipt,
        })
    }

    /// Discard `card` from `seat`'s hand.
    #[instrument(skip_all, fields(game = %game, card = %card))]
    pub async fn discard(
        &self,
        game: &ObjectId,
        seat: Seat,
        card: &CardRef,
        view: &PlayerBackendView,
    ) -> Result<TxReceipt, ClientError> {
        let call = self
            .call("discard")
            .arg(MoveArg::Object(game.clone()))
            .arg(MoveArg::Bool(seat.is_player_1()))
            .arg(MoveArg::Object(card.clone().into()))
            .arg(MoveArg::Cards(view.hand.clone()));
        self.submit(call).await
    }

    /// Play `card` from `seat`'s hand onto the board.
    #[instrument(skip_all, fields(game = %game, card = %card))]
    pub async fn play(
        &self,
        game: &ObjectId,
        seat: Seat,
        card: &CardRef,
        view: &PlayerBackendView,
    ) -> Result<TxReceipt, ClientError> {
        let call = self
            .call("play")
            .arg(MoveArg::Object(game.clone()))
            .arg(MoveArg::Bool(seat.is_player_1()))
            .arg(MoveArg::Object(card.clone().into()))
            .arg(MoveArg::Cards(view.hand.clone()));
        self.submit(call).await
    }

    /// Attack with the selected cards.
    #[instrument(skip_all, fields(game = %game))]
    pub async fn attack(
        &self,
        game: &ObjectId,
        seat: Seat,
        selection: &AttackSelection,
    ) -> Result<TxReceipt, ClientError> {
        let call = self
            .call("attack")
            .arg(MoveArg::Object(game.clone()))
            .arg(MoveArg::Bool(seat.is_player_1()))
            .arg(MoveArg::Cards(selection.attackers.clone()))
            .arg(MoveArg::Cards(selection.defenders.clone()));
        self.submit(call).await
    }

    /// Pass the turn to the opponent.
    #[instrument(skip_all, fields(game = %game))]
    pub async fn end_turn(&self, game: &ObjectId) -> Result<TxReceipt, ClientError> {
        let call = self.call("end_turn").arg(MoveArg::Object(game.clone()));
        self.submit(call).await
    }

    /// Concede the game.
    #[instrument(skip_all, fields(game = %game))]
    pub async fn surrender(&self, game: &ObjectId) -> Result<TxReceipt, ClientError> {
        let call = self.call("surrender").arg(MoveArg::Object(game.clone()));
        self.submit(call).await
    }

    /// Accept a challenge. Returns the ID of the game it creates.
    #[instrument(skip_all, fields(challenge = %challenge))]
    pub async fn accept_challenge(&self, challenge: &ObjectId) -> Result<ObjectId, ClientError> {
        let call = self
            .call("accept_challenge")
            .arg(MoveArg::Object(challenge.clone()));
        let receipt = self.submit(call).await?;
        receipt.created.into_iter().next().ok_or_else(|| {
            ClientError::logical(format!("accepting challenge {challenge} created no game"))
        })
    }
}
