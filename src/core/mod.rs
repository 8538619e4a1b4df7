//! Core client types: identifiers, seats, move calls, RNG, configuration.
//!
//! This module contains the building blocks shared by every other module.
//! None of it performs I/O.

pub mod ids;
pub mod seat;
pub mod rng;
pub mod config;
pub mod action;

pub use ids::{Address, CardRef, ObjectId};
pub use seat::{Seat, SeatMap};
pub use rng::DealRng;
pub use config::{ClientConfig, ObjectKind};
pub use action::{MoveArg, MoveCall, TxReceipt};
