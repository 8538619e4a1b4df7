//! Card system: resolved cards, reconciliation, and the async cache.
//!
//! ## Key Types
//!
//! - `Card`: Resolved attributes of an on-chain card object
//! - `reconcile` / `missing`: Pure list reconciliation against known cards
//! - `CardCache`: Identifier-keyed cache with fire-and-forget resolution

pub mod card;
pub mod reconcile;
pub mod cache;

pub use card::Card;
pub use reconcile::{missing, reconcile};
pub use cache::CardCache;
