//! Reconciling an identifier list against already-resolved cards.
//!
//! The backend and the chain report collections as ordered lists of
//! `CardRef`s. The renderer needs resolved `Card`s. `reconcile` keeps the
//! resolved cards that are still listed, in list order, at most once each;
//! `missing` lists what still has to be fetched.

use rustc_hash::{FxHashMap, FxHashSet};

use super::card::Card;
use crate::core::CardRef;

/// Resolved cards still present in `ids`, ordered as in `ids`.
///
/// Cards whose identifier is absent from `ids` are dropped. Duplicate
/// identifiers in either input produce a single entry.
///
/// ```
/// use card_duel_client::cards::{reconcile, Card};
/// use card_duel_client::core::CardRef;
///
/// let ids = vec![CardRef::new("b"), CardRef::new("a")];
/// let known = vec![Card::new("a", "A"), Card::new("stale", "S"), Card::new("b", "B")];
///
/// let names: Vec<_> = reconcile(&ids, &known).into_iter().map(|c| c.name).collect();
/// assert_eq!(names, vec!["B", "A"]);
/// ```
#[must_use]
pub fn reconcile(ids: &[CardRef], known: &[Card]) -> Vec<Card> {
    let by_id: FxHashMap<&CardRef, &Card> = known.iter().map(|card| (&card.id, card)).collect();
    collect_in_order(ids, |id| by_id.get(id).map(|card| (*card).clone()))
}

/// Identifiers in `ids` with no resolved card in `known`, deduplicated,
/// in first-seen order. Empty identifiers are skipped.
#[must_use]
pub fn missing(ids: &[CardRef], known: &[Card]) -> Vec<CardRef> {
    let have: FxHashSet<&CardRef> = known.iter().map(|card| &card.id).collect();
    let mut seen = FxHashSet::default();
    ids.iter()
        .filter(|id| !id.is_empty() && !have.contains(id) && seen.insert(*id))
        .cloned()
        .collect()
}

/// Walk `ids` once, keeping the first resolution of each identifier.
pub(crate) fn collect_in_order<F>(ids: &[CardRef], mut resolve: F) -> Vec<Card>
where
    F: FnMut(&CardRef) -> Option<Card>,
{
    let mut seen = FxHashSet::default();
    ids.iter()
        .filter(|id| seen.insert(*id))
        .filter_map(|id| resolve(id))
        .collect()
}
