//! # card-duel-client
//!
//! Headless client for a two-player on-chain card duel.
//!
//! Public board state lives in a `card_game` Move module on chain; each
//! player's hidden hand and deck lists live in a small companion backend.
//! The client merges both into per-player snapshots, runs the local
//! player's turn as an explicit state machine, and submits every action as
//! a single Move call through the host's wallet.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: The chain provider, wallet and backend sit behind
//!    traits. Rendering and navigation stay with the host; the client hands
//!    back `Route` values.
//!
//! 2. **Confirmed State Only**: Nothing local changes before the wallet
//!    confirms a transaction, so a failed action needs no rollback.
//!
//! 3. **Poll, Don't Subscribe**: Sessions and the lobby run on explicit
//!    timers and stop on a `CancellationToken`.
//!
//! ## Modules
//!
//! - `core`: Identifiers, seats, Move calls, RNG, configuration
//! - `chain`: Provider/wallet traits and object decoding
//! - `cards`: Resolved cards, list reconciliation, async card cache
//! - `zones`: Backend views and per-player snapshots
//! - `backend`: Companion backend trait and HTTP client
//! - `turn`: Turn state machine and click interpretation
//! - `actions`: Action dispatcher (one Move call per action)
//! - `lobby`: Challenge listener, challenge acceptance, game creation
//! - `session`: Poll cycle and action handlers for a running game

pub mod core;
pub mod error;
pub mod telemetry;
pub mod chain;
pub mod cards;
pub mod zones;
pub mod backend;
pub mod turn;
pub mod actions;
pub mod lobby;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Address, CardRef, ObjectId,
    Seat, SeatMap,
    DealRng,
    ClientConfig, ObjectKind,
    MoveArg, MoveCall, TxReceipt,
};

pub use crate::error::{ClientError, ErrorKind};

pub use crate::chain::{ChainObject, ChainPlayer, ChainProvider, ChallengeObject, GameObject, Wallet};

pub use crate::cards::{reconcile, Card, CardCache};

pub use crate::zones::{BackendPlayers, PlayerBackendView, PlayerSnapshot, Zone};

pub use crate::backend::{Backend, HttpBackend};

pub use crate::turn::{
    transition, AttackSelection, ClickIntent, Transition,
    TurnCommand, TurnController, TurnEvent, TurnPhase, TurnState,
};

pub use crate::actions::{ActionDispatcher, DrawOutcome};

pub use crate::lobby::{ChallengeListener, ChallengeRecord, ChallengeStore, GameSetup, Route};

pub use crate::session::{Board, GameSession};
