//! Turn phase tracking and click interpretation.
//!
//! - `phase`: `TurnState` tagged variants and the `transition` function
//! - `controller`: `TurnController`, the stateful per-seat wrapper
//! - `click`: what a card click means in each phase

pub mod phase;
pub mod controller;
pub mod click;

pub use phase::{transition, Transition, TurnCommand, TurnEvent, TurnPhase, TurnState};
pub use controller::TurnController;
pub use click::{interpret_click, AttackSelection, ClickIntent};
