//! Chain objects and their decoded `card_game` shapes.
//!
//! The provider hands back objects as a type string plus a JSON `fields`
//! map. Nested structs arrive wrapped again in `{ "fields": ... }` and UIDs
//! as `{ "id": "0x.." }`. Integers may be encoded as strings (u64 on chain)
//! or numbers depending on the provider, so numeric fields accept both.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::core::{Address, CardRef, ObjectId, SeatMap};
use crate::error::ClientError;

/// An object as reported by the chain provider or held by the wallet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainObject {
    /// Object ID.
    pub object_id: ObjectId,

    /// Fully-qualified Move type string.
    pub object_type: String,

    /// The object's `fields` map.
    pub content: serde_json::Value,
}

impl ChainObject {
    /// Create an object record.
    pub fn new(
        object_id: impl Into<ObjectId>,
        object_type: impl Into<String>,
        content: serde_json::Value,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            object_type: object_type.into(),
            content,
        }
    }

    /// Decode the content into a typed view.
    pub fn decode<T: DeserializeOwned>(&self, what: &str) -> Result<T, ClientError> {
        serde_json::from_value(self.content.clone()).map_err(|err| {
            ClientError::decode(format!("{what} {} has unexpected content", self.object_id), err)
        })
    }
}

/// `{ "fields": T }` wrapper used for nested Move structs.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Nested<T> {
    pub fields: T,
}

/// `{ "id": "0x.." }` UID wrapper.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Uid {
    pub id: ObjectId,
}

/// Hidden/hashed collection commitment, rendered as text.
///
/// Providers report `vector<u8>` either as a string or as a byte array;
/// byte arrays are rendered as `0x`-prefixed hex.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawCommitment")]
pub struct Commitment(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCommitment {
    Text(String),
    Bytes(Vec<u8>),
}

impl From<RawCommitment> for Commitment {
    fn from(raw: RawCommitment) -> Self {
        match raw {
            RawCommitment::Text(text) => Commitment(text),
            RawCommitment::Bytes(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
                Commitment(format!("0x{hex}"))
            }
        }
    }
}

/// Chain-reported state of one player inside a game.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ChainPlayer {
    /// Player's wallet address.
    #[serde(rename = "addr")]
    pub address: Address,

    /// Cards in play.
    #[serde(default)]
    pub board: Vec<CardRef>,

    /// Cards destroyed or discarded.
    #[serde(default)]
    pub graveyard: Vec<CardRef>,

    /// Commitment over the hidden deck.
    #[serde(default)]
    pub deck_commitment: Commitment,

    /// Commitment over the hidden hand.
    #[serde(default)]
    pub hand_commitment: Commitment,

    /// Reported deck size.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub deck_size: u64,

    /// Reported hand size.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub hand_size: u64,

    /// Remaining life.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub life: u64,

    /// Player record object ID.
    #[serde(default, rename = "id", deserialize_with = "uid_or_default")]
    pub record_id: ObjectId,
}

fn uid_or_default<'de, D>(deserializer: D) -> Result<ObjectId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Uid>::deserialize(deserializer)?
        .map(|uid| uid.id)
        .unwrap_or_default())
}

#[derive(Deserialize)]
struct GameFields {
    player_1: Nested<ChainPlayer>,
    player_2: Option<Nested<ChainPlayer>>,
    #[serde(default)]
    is_player_1_turn: Option<bool>,
}

/// Decoded `card_game::Game` object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameObject {
    /// Game object ID.
    pub id: ObjectId,

    /// Both players. `player_2` may be unpopulated while the game is being
    /// set up; it is then `None`.
    pub player_1: ChainPlayer,
    pub player_2: Option<ChainPlayer>,

    /// Turn owner, when the module reports it.
    pub is_player_1_turn: Option<bool>,
}

impl GameObject {
    /// Decode a Game object.
    pub fn from_object(object: &ChainObject) -> Result<Self, ClientError> {
        let fields: GameFields = object.decode("game")?;
        Ok(Self {
            id: object.object_id.clone(),
            player_1: fields.player_1.fields,
            player_2: fields.player_2.map(|nested| nested.fields),
            is_player_1_turn: fields.is_player_1_turn,
        })
    }

    /// True when the second slot holds a real player.
    #[must_use]
    pub fn has_second_player(&self) -> bool {
        self.player_2
            .as_ref()
            .is_some_and(|player| !player.address.is_empty())
    }

    /// Both players, if the game is fully populated.
    #[must_use]
    pub fn players(&self) -> Option<SeatMap<&ChainPlayer>> {
        self.player_2
            .as_ref()
            .map(|two| SeatMap::new(&self.player_1, two))
    }

    /// True when `address` occupies either slot.
    #[must_use]
    pub fn involves(&self, address: &Address) -> bool {
        self.player_1.address == *address
            || self
                .player_2
                .as_ref()
                .is_some_and(|two| two.address == *address)
    }
}

#[derive(Deserialize)]
struct ChallengeFields {
    challenger: Address,
}

/// Decoded `card_game::Challenge` object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeObject {
    pub id: ObjectId,
    pub challenger: Address,
}

impl ChallengeObject {
    /// Decode a Challenge object.
    pub fn from_object(object: &ChainObject) -> Result<Self, ClientError> {
        let fields: ChallengeFields = object.decode("challenge")?;
        Ok(Self {
            id: object.object_id.clone(),
            challenger: fields.challenger,
        })
    }
}
