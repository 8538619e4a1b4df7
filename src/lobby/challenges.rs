//! Incoming challenges.
//!
//! The listener is a plain timer-driven poll. Each tick scans the wallet's
//! objects once and writes any new challenges into a `ChallengeStore` that
//! the host owns and may read at any time (to render the lobby). Writing to
//! the store never triggers another scan.
//!
//! A tick also watches for a Game object that already seats the local
//! wallet with a populated second player; that means a challenge we sent
//! was accepted, and the host should navigate to it.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::setup::GameSetup;
use super::Route;
use crate::actions::ActionDispatcher;
use crate::chain::{ChainObject, ChallengeObject, GameObject, Wallet};
use crate::core::{Address, ClientConfig, DealRng, ObjectId, ObjectKind};
use crate::error::ClientError;

/// A challenge waiting for the local player's answer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChallengeRecord {
    pub challenge: ObjectId,
    pub challenger: Address,
}

/// Append-only list of challenges, shared between the listener and the host.
///
/// A record is only added when neither its challenge ID nor its challenger
/// address is already present.
#[derive(Clone, Debug, Default)]
pub struct ChallengeStore {
    records: Arc<RwLock<Vec<ChallengeRecord>>>,
}

impl ChallengeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record unless it duplicates an existing one. Returns `true`
    /// when the record was added.
    pub fn record(&self, record: ChallengeRecord) -> bool {
        let mut records = self.records.write();
        let known = records
            .iter()
            .any(|r| r.challenge == record.challenge || r.challenger == record.challenger);
        if known {
            return false;
        }
        records.push(record);
        true
    }

    /// Copy of all records, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<ChallengeRecord> {
        self.records.read().clone()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<ChallengeRecord> {
        self.records.read().get(index).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

/// Scans wallet contents for challenges and started games.
pub struct ChallengeListener {
    config: ClientConfig,
    wallet: Arc<dyn Wallet>,
    dispatcher: ActionDispatcher,
    setup: GameSetup,
    store: ChallengeStore,
}

impl std::fmt::Debug for ChallengeListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChallengeListener")
            .field("wallet", &self.wallet.address())
            .field("challenges", &self.store.len())
            .finish()
    }
}

impl ChallengeListener {
    pub fn new(
        config: ClientConfig,
        wallet: Arc<dyn Wallet>,
        dispatcher: ActionDispatcher,
        setup: GameSetup,
        store: ChallengeStore,
    ) -> Self {
        Self {
            config,
            wallet,
            dispatcher,
            setup,
            store,
        }
    }

    /// The store this listener writes to.
    #[must_use]
    pub fn store(&self) -> &ChallengeStore {
        &self.store
    }

    /// Run one scan. Returns a route when a started game was found.
    ///
    /// Every challenge in the scan is recorded, even when a started game
    /// comes first. Objects that fail to decode are logged and skipped; only
    /// a failed wallet query fails the tick.
    #[instrument(skip_all)]
    pub async fn poll_once(&self) -> Result<Option<Route>, ClientError> {
        let objects = self.wallet.objects().await?;
        let local = self.wallet.address();
        let mut started = None;

        for object in &objects {
            match self.config.classify(&object.object_type) {
                Some(ObjectKind::Challenge) => self.observe_challenge(object),
                Some(ObjectKind::Game) if started.is_none() => {
                    started = started_game(object, &local);
                }
                Some(ObjectKind::Game | ObjectKind::Card) | None => {}
            }
        }

        if let Some(route) = &started {
            info!(route = %route, "game started");
        }
        Ok(started)
    }

    /// Poll on the configured interval until a game starts or `token` is
    /// cancelled. Tick failures are logged and the loop carries on.
    pub async fn run(&self, token: CancellationToken) -> Option<Route> {
        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    debug!("challenge listener stopped");
                    return None;
                }
                _ = ticker.tick() => {}
            }

            match self.poll_once().await {
                Ok(Some(route)) => return Some(route),
                Ok(None) => {}
                Err(err) => {
                    warn!(error = %err, kind = ?err.kind(), "challenge poll failed");
                }
            }
        }
    }

    /// Accept the challenge at `index`, deal the new game and return its
    /// route.
    #[instrument(skip(self, rng))]
    pub async fn accept(&self, index: usize, rng: &DealRng) -> Result<Route, ClientError> {
        let record = self
            .store
            .get(index)
            .ok_or_else(|| ClientError::logical(format!("no challenge at index {index}")))?;

        let game = self.dispatcher.accept_challenge(&record.challenge).await?;
        self.setup.create_game(&record.challenger, rng).await?;

        info!(game = %game, challenger = %record.challenger, "challenge accepted");
        Ok(Route::Game(game))
    }

    fn observe_challenge(&self, object: &ChainObject) {
        let challenge = match ChallengeObject::from_object(object) {
            Ok(challenge) => challenge,
            Err(err) => {
                warn!(object = %object.object_id, error = %err, "skipping unreadable challenge");
                return;
            }
        };
        let added = self.store.record(ChallengeRecord {
            challenge: challenge.id,
            challenger: challenge.challenger.clone(),
        });
        if added {
            info!(challenger = %challenge.challenger, "new challenge");
        }
    }
}

fn started_game(object: &ChainObject, local: &Address) -> Option<Route> {
    match GameObject::from_object(object) {
        Ok(game) if game.has_second_player() && game.involves(local) => Some(Route::Game(game.id)),
        Ok(_) => None,
        Err(err) => {
            warn!(object = %object.object_id, error = %err, "skipping unreadable game");
            None
        }
    }
}
