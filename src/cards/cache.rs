//! Asynchronous card cache.
//!
//! `CardCache` resolves `CardRef`s through the chain provider and keeps the
//! results keyed by identifier. Fetches are fire-and-forget: `reconcile`
//! returns immediately with whatever is already confirmed and starts fetches
//! for the rest, which show up on a later call.
//!
//! Pending fetches are tracked apart from confirmed entries. Eviction
//! (`retain`) only ever touches confirmed entries, so a card requested in one
//! poll cycle is never lost because an eviction ran before its fetch landed.
//!
//! Every method that may start a fetch must run inside a Tokio runtime.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

use super::card::Card;
use super::reconcile::collect_in_order;
use crate::chain::ChainProvider;
use crate::core::{CardRef, ObjectId};
use crate::error::ClientError;

type FetchResult = (CardRef, Result<Option<Card>, ClientError>);

/// Identifier-keyed cache of resolved cards with out-of-order completion.
pub struct CardCache {
    provider: Arc<dyn ChainProvider>,
    confirmed: FxHashMap<CardRef, Card>,
    pending: FxHashSet<CardRef>,
    tasks: JoinSet<FetchResult>,
}

impl std::fmt::Debug for CardCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardCache")
            .field("confirmed", &self.confirmed.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl CardCache {
    /// Create an empty cache backed by `provider`.
    pub fn new(provider: Arc<dyn ChainProvider>) -> Self {
        Self {
            provider,
            confirmed: FxHashMap::default(),
            pending: FxHashSet::default(),
            tasks: JoinSet::new(),
        }
    }

    /// Resolved cards for `ids`, in list order, at most once each.
    ///
    /// Absorbs fetches that finished since the last call, then starts a
    /// fetch for every listed identifier that is neither confirmed nor
    /// already pending. Newly started fetches are not reflected in the
    /// returned list.
    pub fn reconcile(&mut self, ids: &[CardRef]) -> Vec<Card> {
        self.absorb_finished();

        for id in ids {
            if id.is_empty() || self.confirmed.contains_key(id) || self.pending.contains(id) {
                continue;
            }
            self.spawn_fetch(id.clone());
        }

        collect_in_order(ids, |id| self.confirmed.get(id).cloned())
    }

    /// Wait for every pending fetch to finish.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            self.absorb(joined);
        }
    }

    /// Drop confirmed entries not in `live`. Pending fetches are untouched.
    pub fn retain(&mut self, live: &FxHashSet<CardRef>) {
        let before = self.confirmed.len();
        self.confirmed.retain(|id, _| live.contains(id));
        let evicted = before - self.confirmed.len();
        if evicted > 0 {
            debug!(evicted, "evicted stale cards");
        }
    }

    /// Seed a card resolved elsewhere (e.g. from wallet contents).
    pub fn insert(&mut self, card: Card) {
        self.pending.remove(&card.id);
        self.confirmed.insert(card.id.clone(), card);
    }

    /// Look up a confirmed card.
    #[must_use]
    pub fn get(&self, id: &CardRef) -> Option<&Card> {
        self.confirmed.get(id)
    }

    /// Number of confirmed cards.
    #[must_use]
    pub fn confirmed_count(&self) -> usize {
        self.confirmed.len()
    }

    /// Number of fetches in flight.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// True if a fetch for `id` is in flight.
    #[must_use]
    pub fn is_pending(&self, id: &CardRef) -> bool {
        self.pending.contains(id)
    }

    fn spawn_fetch(&mut self, id: CardRef) {
        debug!(card = %id, "resolving card");
        self.pending.insert(id.clone());
        let provider = Arc::clone(&self.provider);
        self.tasks.spawn(async move {
            let result = provider
                .get_object(&ObjectId::from(id.clone()))
                .await
                .and_then(|object| object.as_ref().map(Card::from_object).transpose());
            (id, result)
        });
    }

    fn absorb_finished(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            self.absorb(joined);
        }
    }

    fn absorb(&mut self, joined: Result<FetchResult, JoinError>) {
        match joined {
            Ok((id, Ok(Some(card)))) => {
                self.pending.remove(&id);
                self.confirmed.insert(id, card);
            }
            Ok((id, Ok(None))) => {
                self.pending.remove(&id);
                warn!(card = %id, "card object not found; will retry next poll");
            }
            Ok((id, Err(err))) => {
                self.pending.remove(&id);
                warn!(card = %id, error = %err, kind = ?err.kind(), "card fetch failed; will retry next poll");
            }
            Err(err) => {
                // The failed task's identifier is lost with it. Forget every
                // pending mark so the next reconcile re-requests anything
                // still missing; duplicate completions overwrite harmlessly.
                warn!(error = %err, "card fetch task aborted");
                self.pending.clear();
            }
        }
    }
}
