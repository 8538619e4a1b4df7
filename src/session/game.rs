//! Game session: board synchronization and turn driving.
//!
//! ## Poll cycle
//!
//! `refresh` pulls the backend document, finds the game object under the
//! active player's address, and rebuilds both snapshots through the card
//! cache. The seat holding the game object owns the turn unless the object
//! carries an explicit `is_player_1_turn` flag. Nothing is written to the session until every network call of the
//! cycle has returned, and nothing at all once the session is cancelled.
//!
//! `tick` is `refresh` followed by one controller evaluation, which may
//! submit a draw. Failures at either step are logged and the next tick
//! tries again.
//!
//! ## Player actions
//!
//! Clicks, attack declaration, end-turn and surrender go straight to the
//! dispatcher. The controller only moves once the wallet confirms, so a
//! rejected call leaves the session exactly as it was.

use std::sync::Arc;

use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::actions::ActionDispatcher;
use crate::backend::Backend;
use crate::cards::CardCache;
use crate::chain::{ChainObject, ChainProvider, GameObject, Wallet};
use crate::core::{CardRef, ClientConfig, ObjectId, ObjectKind, Seat, SeatMap};
use crate::error::ClientError;
use crate::lobby::Route;
use crate::turn::{
    interpret_click, AttackSelection, ClickIntent, TurnCommand, TurnController, TurnEvent,
    TurnPhase,
};
use crate::zones::{referenced_ids, BackendPlayers, PlayerBackendView, PlayerSnapshot};

/// Board state from the last applied poll cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Normalized backend hand/deck lists, as sent with actions.
    pub views: SeatMap<PlayerBackendView>,
    /// Resolved per-seat snapshots, for rendering and click interpretation.
    pub players: SeatMap<PlayerSnapshot>,
}

/// One game, driven from the local wallet's seat.
pub struct GameSession {
    config: ClientConfig,
    provider: Arc<dyn ChainProvider>,
    wallet: Arc<dyn Wallet>,
    backend: Arc<dyn Backend>,
    dispatcher: ActionDispatcher,
    game_id: ObjectId,
    cache: CardCache,
    controller: Option<TurnController>,
    board: Option<Board>,
    selection: AttackSelection,
    last_turn_owner: Option<Seat>,
    token: CancellationToken,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("game_id", &self.game_id)
            .field("controller", &self.controller)
            .field("cache", &self.cache)
            .finish()
    }
}

impl GameSession {
    pub fn new(
        config: ClientConfig,
        provider: Arc<dyn ChainProvider>,
        wallet: Arc<dyn Wallet>,
        backend: Arc<dyn Backend>,
        game_id: impl Into<ObjectId>,
    ) -> Self {
        let dispatcher = ActionDispatcher::new(Arc::clone(&wallet), config.clone());
        let cache = CardCache::new(Arc::clone(&provider));
        Self {
            config,
            provider,
            wallet,
            backend,
            dispatcher,
            game_id: game_id.into(),
            cache,
            controller: None,
            board: None,
            selection: AttackSelection::default(),
            last_turn_owner: None,
            token: CancellationToken::new(),
        }
    }

    /// Tie the session's lifetime to a host-owned token (builder pattern).
    #[must_use]
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Run one poll cycle.
    #[instrument(skip_all, fields(game = %self.game_id))]
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let backend = self.backend.get_players().await?;
        let local_address = self.wallet.address();
        let local = backend.seat_of(&local_address).ok_or_else(|| {
            ClientError::logical(format!("wallet {local_address} holds neither seat of the game"))
        })?;

        let active = self.controller.map_or(Seat::One, |c| c.active());
        let (game, holder) = self.find_game(&backend, active).await?;
        let chain = game.players().ok_or_else(|| {
            ClientError::logical(format!("game {} has no second player", self.game_id))
        })?;

        if self.token.is_cancelled() {
            debug!("session cancelled; dropping poll results");
            return Ok(());
        }

        let views = backend.into_seats().map(|_, view| view.normalized());
        let cache = &mut self.cache;
        let players =
            SeatMap::from_fn(|seat| PlayerSnapshot::build(chain[seat], &views[seat], cache));
        let live = referenced_ids(Seat::ALL.map(|seat| (chain[seat], &views[seat])));
        self.cache.retain(&live);

        if self.local_seat() != Some(local) {
            info!(seat = %local, "joined game");
            self.controller = Some(TurnController::new(local));
        }
        // Only a change of owner is news; a stale repeat would undo an
        // end-turn the chain has not caught up with yet.
        let owner = match game.is_player_1_turn {
            Some(true) => Seat::One,
            Some(false) => Seat::Two,
            None => holder,
        };
        if self.last_turn_owner != Some(owner) {
            self.last_turn_owner = Some(owner);
            self.apply(TurnEvent::TurnObserved(owner));
        }

        self.board = Some(Board { views, players });
        Ok(())
    }

    /// One poll tick: refresh, then let the controller act.
    pub async fn tick(&mut self) {
        if let Err(err) = self.refresh().await {
            warn!(game = %self.game_id, error = %err, kind = ?err.kind(), "board refresh failed");
        }
        self.evaluate().await;
    }

    /// Tick on the configured interval until the session is cancelled.
    pub async fn run(&mut self) {
        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let token = self.token.clone();

        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    debug!(game = %self.game_id, "session stopped");
                    return;
                }
                _ = ticker.tick() => {}
            }
            self.tick().await;
        }
    }

    /// Handle a click on `card` for the local seat.
    ///
    /// Discard and play are submitted immediately; attack-phase clicks only
    /// update the selection. Returns what the click was taken to mean.
    #[instrument(skip_all, fields(game = %self.game_id, card = %card))]
    pub async fn click_card(&mut self, card: &CardRef) -> Result<ClickIntent, ClientError> {
        let (Some(controller), Some(board)) = (self.controller, self.board.as_ref()) else {
            return Ok(ClickIntent::Ignore);
        };
        if !controller.is_local_turn() {
            return Ok(ClickIntent::Ignore);
        }
        let local = controller.local();
        let intent = interpret_click(controller.phase(), card, local, &board.players);
        let view = board.views[local].clone();

        match &intent {
            ClickIntent::Discard(card) => {
                self.dispatcher.discard(&self.game_id, local, card, &view).await?;
                self.apply(TurnEvent::DiscardCompleted);
            }
            ClickIntent::Play(card) => {
                self.dispatcher.play(&self.game_id, local, card, &view).await?;
                self.apply(TurnEvent::PlayCompleted);
            }
            ClickIntent::SelectAttacker(_) | ClickIntent::SelectDefender(_) => {
                self.selection.apply(&intent);
            }
            ClickIntent::Ignore => {}
        }
        Ok(intent)
    }

    /// Submit the current attacker/defender selection.
    #[instrument(skip_all, fields(game = %self.game_id))]
    pub async fn declare_attack(&mut self) -> Result<(), ClientError> {
        let local = self.local_seat_in(TurnPhase::Attack, "declare an attack")?;
        self.dispatcher.attack(&self.game_id, local, &self.selection).await?;
        self.selection.clear();
        self.apply(TurnEvent::AttackCompleted);
        Ok(())
    }

    /// Pass the turn.
    #[instrument(skip_all, fields(game = %self.game_id))]
    pub async fn end_turn(&mut self) -> Result<(), ClientError> {
        if !self.can_end_turn() {
            return Err(ClientError::logical("cannot end the turn now"));
        }
        self.dispatcher.end_turn(&self.game_id).await?;
        self.selection.clear();
        self.apply(TurnEvent::EndTurnCompleted);
        Ok(())
    }

    /// Concede and stop the session. Returns the lobby route.
    #[instrument(skip_all, fields(game = %self.game_id))]
    pub async fn surrender(&mut self) -> Result<Route, ClientError> {
        self.dispatcher.surrender(&self.game_id).await?;
        self.token.cancel();
        info!("surrendered");
        Ok(Route::Lobby)
    }

    /// Wait for every outstanding card fetch.
    pub async fn settle_cards(&mut self) {
        self.cache.settle().await;
    }

    /// Route of this game.
    #[must_use]
    pub fn route(&self) -> Route {
        Route::Game(self.game_id.clone())
    }

    #[must_use]
    pub fn game_id(&self) -> &ObjectId {
        &self.game_id
    }

    /// Local seat, once the first refresh has succeeded.
    #[must_use]
    pub fn local_seat(&self) -> Option<Seat> {
        self.controller.map(|c| c.local())
    }

    #[must_use]
    pub fn controller(&self) -> Option<&TurnController> {
        self.controller.as_ref()
    }

    /// Current phase, once known.
    #[must_use]
    pub fn phase(&self) -> Option<TurnPhase> {
        self.controller.map(|c| c.phase())
    }

    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> &AttackSelection {
        &self.selection
    }

    /// True when the end-turn action is available.
    #[must_use]
    pub fn can_end_turn(&self) -> bool {
        self.controller.is_some_and(|c| c.can_end_turn())
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token that stops `run` and discards in-flight poll results.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    async fn evaluate(&mut self) {
        if self.token.is_cancelled() || self.board.is_none() {
            return;
        }
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        if let Some(TurnCommand::Draw) = controller.apply(TurnEvent::Evaluate) {
            self.draw().await;
        }
    }

    async fn draw(&mut self) {
        let (Some(controller), Some(board)) = (self.controller, self.board.as_ref()) else {
            return;
        };
        let local = controller.local();
        let view = board.views[local].clone();

        let event = match self.dispatcher.draw(&self.game_id, local, &view).await {
            Ok(outcome) => TurnEvent::DrawCompleted {
                discard_required: outcome.discard_required,
            },
            Err(err) => {
                warn!(game = %self.game_id, error = %err, kind = ?err.kind(), "draw failed");
                TurnEvent::ActionFailed
            }
        };
        self.apply(event);
    }

    fn apply(&mut self, event: TurnEvent) {
        if let Some(controller) = self.controller.as_mut() {
            controller.apply(event);
        }
    }

    fn local_seat_in(&self, phase: TurnPhase, what: &str) -> Result<Seat, ClientError> {
        match self.controller {
            Some(controller) if controller.is_local_turn() && controller.phase() == phase => {
                Ok(controller.local())
            }
            _ => Err(ClientError::logical(format!("cannot {what} outside the {phase:?} phase"))),
        }
    }

    /// Locate the game among the objects owned by the `active` seat, falling
    /// back to its opponent when the object has already moved with the turn.
    /// Returns the decoded game and the seat that holds it.
    async fn find_game(
        &self,
        backend: &BackendPlayers,
        active: Seat,
    ) -> Result<(GameObject, Seat), ClientError> {
        for seat in [active, active.opponent()] {
            let objects = self.provider.owned_objects(&backend.seat(seat).address).await?;
            if let Some(object) = self.select_game(&objects) {
                return Ok((GameObject::from_object(object)?, seat));
            }
        }
        Err(ClientError::logical(format!(
            "game {} not found for {} or {}",
            self.game_id,
            backend.seat(active).address,
            backend.seat(active.opponent()).address
        )))
    }

    fn select_game<'a>(&self, objects: &'a [ChainObject]) -> Option<&'a ChainObject> {
        objects.iter().find(|object| {
            object.object_id == self.game_id
                && self.config.classify(&object.object_type) == Some(ObjectKind::Game)
        })
    }
}
