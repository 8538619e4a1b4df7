//! Action dispatch: draw, discard, play, attack, end-turn, surrender,
//! accept-challenge.

pub mod dispatcher;

pub use dispatcher::{ActionDispatcher, DrawOutcome};
