//! A running game as seen from the local wallet.
//!
//! ## Key Types
//!
//! - `GameSession`: Poll cycle, turn controller and action handlers for one game
//! - `Board`: The latest per-seat backend views and resolved snapshots

pub mod game;

pub use game::{Board, GameSession};
