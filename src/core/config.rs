//! Client configuration.
//!
//! Hosts configure the client at startup by providing a `ClientConfig`,
//! either through the builder methods or from the environment with
//! [`ClientConfig::from_env`].
//!
//! | Variable                     | Default                 |
//! |------------------------------|-------------------------|
//! | `CARD_DUEL_MODULE_ADDRESS`   | required                |
//! | `CARD_DUEL_BACKEND_URL`      | `http://localhost:5002` |
//! | `CARD_DUEL_MAX_HAND_SIZE`    | `5`                     |
//! | `CARD_DUEL_TOTAL_DECK_SIZE`  | `20`                    |
//! | `CARD_DUEL_POLL_INTERVAL_MS` | `2000`                  |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ClientError;

/// Default companion backend location.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5002";
/// Default hand limit; reaching it on a draw forces a discard.
pub const DEFAULT_MAX_HAND_SIZE: usize = 5;
/// Default number of cards a deck is cut to at game creation.
pub const DEFAULT_TOTAL_DECK_SIZE: usize = 20;
/// Default delay between poll ticks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Object kinds published by the `card_game` Move module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A collectible card.
    Card,
    /// A pending request to play.
    Challenge,
    /// An active match.
    Game,
}

impl ObjectKind {
    /// Struct name inside the module.
    #[must_use]
    pub const fn struct_name(self) -> &'static str {
        match self {
            ObjectKind::Card => "Card",
            ObjectKind::Challenge => "Challenge",
            ObjectKind::Game => "Game",
        }
    }
}

/// Complete client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Package address the `card_game` module is published under.
    pub module_address: String,

    /// Base URL of the companion backend (no trailing slash).
    pub backend_url: String,

    /// Hand size that forces a discard after a draw.
    pub max_hand_size: usize,

    /// Deck size at game creation.
    pub total_deck_size: usize,

    /// Delay between poll ticks.
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("0x0")
    }
}

impl ClientConfig {
    /// Create a configuration for the given module address with defaults
    /// for everything else.
    pub fn new(module_address: impl Into<String>) -> Self {
        Self {
            module_address: module_address.into(),
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            max_hand_size: DEFAULT_MAX_HAND_SIZE,
            total_deck_size: DEFAULT_TOTAL_DECK_SIZE,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Load configuration from `CARD_DUEL_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        let module_address = must_var("CARD_DUEL_MODULE_ADDRESS")?;
        let mut config = Self::new(module_address);

        if let Some(url) = opt_var("CARD_DUEL_BACKEND_URL") {
            config = config.with_backend_url(url);
        }
        if let Some(size) = parse_var::<usize>("CARD_DUEL_MAX_HAND_SIZE")? {
            config = config.with_max_hand_size(size);
        }
        if let Some(size) = parse_var::<usize>("CARD_DUEL_TOTAL_DECK_SIZE")? {
            config = config.with_total_deck_size(size);
        }
        if let Some(ms) = parse_var::<u64>("CARD_DUEL_POLL_INTERVAL_MS")? {
            config = config.with_poll_interval(Duration::from_millis(ms));
        }

        if config.max_hand_size == 0 {
            return Err(ClientError::config("CARD_DUEL_MAX_HAND_SIZE must be at least 1"));
        }
        Ok(config)
    }

    /// Set the backend base URL.
    #[must_use]
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the deck size used at game creation.
    #[must_use]
    pub fn with_total_deck_size(mut self, size: usize) -> Self {
        self.total_deck_size = size;
        self
    }

    /// Set the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Fully-qualified Move type string for an object kind.
    ///
    /// ```
    /// use card_duel_client::core::{ClientConfig, ObjectKind};
    ///
    /// let config = ClientConfig::new("0xabc");
    /// assert_eq!(config.type_tag(ObjectKind::Game), "0xabc::card_game::Game");
    /// ```
    #[must_use]
    pub fn type_tag(&self, kind: ObjectKind) -> String {
        format!("{}::card_game::{}", self.module_address, kind.struct_name())
    }

    /// Fully-qualified Move function target.
    #[must_use]
    pub fn function_target(&self, function: &str) -> String {
        format!("{}::card_game::{}", self.module_address, function)
    }

    /// Classify a Move type string published by this module.
    #[must_use]
    pub fn classify(&self, object_type: &str) -> Option<ObjectKind> {
        [ObjectKind::Card, ObjectKind::Challenge, ObjectKind::Game]
            .into_iter()
            .find(|kind| self.type_tag(*kind) == object_type)
    }
}

fn opt_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn must_var(name: &str) -> Result<String, ClientError> {
    opt_var(name).ok_or_else(|| ClientError::config(format!("missing required env: {name}")))
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, ClientError> {
    match opt_var(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ClientError::config(format!("invalid {name}: {raw}"))),
        None => Ok(None),
    }
}
