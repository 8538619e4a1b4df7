//! Chain-side collaborators and object decoding.
//!
//! - `provider`: `ChainProvider` and `Wallet` traits implemented by the host
//! - `object`: `ChainObject` plus decoded `Game` and `Challenge` views

pub mod object;
pub mod provider;

pub use object::{ChainObject, ChainPlayer, ChallengeObject, Commitment, GameObject};
pub use provider::{ChainProvider, Wallet};
