//! Lobby: incoming challenges, challenge acceptance and game creation.
//!
//! ## Key Types
//!
//! - `ChallengeStore`: Shared, append-only list of challenges seen so far
//! - `ChallengeListener`: Timer-driven scan of the wallet's objects
//! - `GameSetup`: Builds and posts both players' opening hand/deck lists
//! - `Route`: Where the host should navigate next

pub mod challenges;
pub mod setup;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ObjectId;

pub use challenges::{ChallengeListener, ChallengeRecord, ChallengeStore};
pub use setup::GameSetup;

/// Navigation target returned to the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// The challenge lobby, `/`.
    Lobby,
    /// An active game, `/game/{id}`.
    Game(ObjectId),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Lobby => write!(f, "/"),
            Route::Game(id) => write!(f, "/game/{id}"),
        }
    }
}
