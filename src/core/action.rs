//! Move call representation: function + arguments.
//!
//! Every player action becomes a single call into the `card_game` Move
//! module. A call is a function name (the "verb") plus typed arguments
//! (the "nouns"). For example:
//! - "Surrender" = `surrender(game)`
//! - "Play card X" = `play(game, is_player_1, X)`
//! - "Attack" = `attack(game, is_player_1, attackers, defenders)`

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ids::{CardRef, ObjectId};

/// A single Move call argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MoveArg {
    /// Shared or owned object passed by ID.
    Object(ObjectId),
    /// Pure boolean.
    Bool(bool),
    /// Pure vector of card object IDs.
    Cards(Vec<CardRef>),
}

/// A transaction to be signed and executed by the wallet.
///
/// ```
/// use card_duel_client::core::{MoveArg, MoveCall, ObjectId};
///
/// let call = MoveCall::new("0xabc::card_game::end_turn")
///     .arg(MoveArg::Object(ObjectId::new("0x77")));
/// assert_eq!(call.arguments.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCall {
    /// Fully-qualified target, `{package}::card_game::{function}`.
    pub target: String,

    /// Call arguments in declaration order.
    /// SmallVec covers every card_game entry function without a heap allocation.
    pub arguments: SmallVec<[MoveArg; 4]>,
}

impl MoveCall {
    /// Create a call with no arguments.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            arguments: SmallVec::new(),
        }
    }

    /// Append an argument (builder pattern).
    #[must_use]
    pub fn arg(mut self, arg: MoveArg) -> Self {
        self.arguments.push(arg);
        self
    }

    /// Function name without the package/module prefix.
    #[must_use]
    pub fn function(&self) -> &str {
        self.target.rsplit("::").next().unwrap_or(&self.target)
    }
}

/// Result of an executed transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction digest.
    pub digest: String,

    /// Objects created by the transaction, in creation order.
    pub created: Vec<ObjectId>,
}
