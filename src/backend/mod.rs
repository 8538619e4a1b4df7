//! Companion backend access.
//!
//! The backend stores each player's hidden hand and deck lists. It exposes
//! two endpoints, with no auth and no versioning:
//!
//! - `GET  /api/get`  returns `{player_1, player_2}`
//! - `POST /api/post` replaces `{player_1, player_2}`

pub mod http;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::zones::BackendPlayers;

pub use http::HttpBackend;

/// Read/write access to the backend's player document.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch both players' hand/deck lists.
    async fn get_players(&self) -> Result<BackendPlayers, ClientError>;

    /// Replace both players' hand/deck lists.
    async fn post_players(&self, players: &BackendPlayers) -> Result<(), ClientError>;
}
