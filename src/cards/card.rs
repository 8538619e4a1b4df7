//! Resolved card attributes.
//!
//! A `Card` is what a `CardRef` resolves to after fetching the card object
//! from the chain. Card objects never change once minted, so a resolved
//! `Card` is cached by identifier for the life of a session.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::chain::object::{Nested, Uid};
use crate::chain::ChainObject;
use crate::core::CardRef;
use crate::error::ClientError;

/// Resolved attributes of an on-chain card.
///
/// ## Example
///
/// ```
/// use card_duel_client::cards::Card;
///
/// let shark = Card::new("0xc1", "Shark")
///     .with_stats(4, 2)
///     .with_description("Bites.");
///
/// assert_eq!(shark.attack, 4);
/// assert_eq!(shark.id.as_str(), "0xc1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Card object ID.
    pub id: CardRef,

    /// Display name.
    pub name: String,

    /// Flavor/rules text.
    pub description: String,

    /// Attack value.
    pub attack: u64,

    /// Defense value.
    pub defense: u64,

    /// Image reference.
    pub image_url: String,
}

#[serde_as]
#[derive(Deserialize)]
struct CardStats {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    attack: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    defense: u64,
}

#[derive(Deserialize)]
struct CardFields {
    id: Uid,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type")]
    stats: Nested<CardStats>,
    #[serde(default)]
    image_url: String,
}

impl Card {
    /// Create a card with zero stats and no text.
    #[must_use]
    pub fn new(id: impl Into<CardRef>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            attack: 0,
            defense: 0,
            image_url: String::new(),
        }
    }

    /// Set attack and defense (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, attack: u64, defense: u64) -> Self {
        self.attack = attack;
        self.defense = defense;
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image reference (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Decode a `card_game::Card` object.
    pub fn from_object(object: &ChainObject) -> Result<Self, ClientError> {
        let fields: CardFields = object.decode("card")?;
        Ok(Self {
            id: fields.id.id.into(),
            name: fields.name,
            description: fields.description,
            attack: fields.stats.fields.attack,
            defense: fields.stats.fields.defense,
            image_url: fields.image_url,
        })
    }
}
