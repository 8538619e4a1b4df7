//! On-chain identifiers.
//!
//! Every chain object (card, challenge, game) is addressed by an opaque
//! object ID string, and every wallet by an address string. The client never
//! interprets either: they are compared for equality and passed back to the
//! chain as-is.
//!
//! ## Usage
//!
//! ```
//! use card_duel_client::core::{Address, CardRef, ObjectId};
//!
//! let card = CardRef::new("0x5a");
//! let game = ObjectId::new("0x77");
//! let owner = Address::new("0xAB");
//!
//! assert_eq!(card.as_str(), "0x5a");
//! assert_eq!(ObjectId::from(card.clone()).as_str(), "0x5a");
//! assert_eq!(format!("{}", owner), "0xAB");
//! # let _ = game;
//! ```

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True for the empty identifier the chain uses for "absent".
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of any chain object (game, challenge, player record).
    ObjectId
);

string_id!(
    /// Identifier of an on-chain card object.
    ///
    /// A `CardRef` is what the backend and the chain exchange; the resolved
    /// attributes live in [`crate::cards::Card`].
    CardRef
);

string_id!(
    /// Wallet address.
    Address
);

impl From<CardRef> for ObjectId {
    fn from(card: CardRef) -> Self {
        Self(card.0)
    }
}

impl From<ObjectId> for CardRef {
    fn from(object: ObjectId) -> Self {
        Self(object.0)
    }
}
