//! Per-player card collections.
//!
//! ## Key Types
//!
//! - `PlayerBackendView`: Address + hand/deck identifiers (backend record)
//! - `BackendPlayers`: The `{player_1, player_2}` backend document
//! - `PlayerSnapshot`: Chain scalars + resolved hand/deck/board/graveyard
//! - `Zone`: Which of the four collections a card sits in

pub mod view;
pub mod snapshot;

pub use view::{BackendPlayers, PlayerBackendView};
pub use snapshot::{referenced_ids, PlayerSnapshot, Zone};
