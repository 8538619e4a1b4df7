//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use card_duel_client::backend::Backend;
use card_duel_client::chain::{ChainObject, ChainProvider, Wallet};
use card_duel_client::core::{Address, ClientConfig, MoveArg, MoveCall, ObjectId, TxReceipt};
use card_duel_client::error::ClientError;
use card_duel_client::zones::BackendPlayers;

pub const MODULE: &str = "0xmod";

pub fn config() -> ClientConfig {
    ClientConfig::new(MODULE)
}

pub fn type_of(kind: &str) -> String {
    format!("{MODULE}::card_game::{kind}")
}

// =============================================================================
// Object builders
// =============================================================================

pub fn card_object(id: &str, name: &str, attack: u64, defense: u64) -> ChainObject {
    ChainObject::new(
        id,
        type_of("Card"),
        json!({
            "id": { "id": id },
            "name": name,
            "description": format!("{name} card"),
            "type": { "fields": { "attack": attack.to_string(), "defense": defense } },
            "image_url": format!("ipfs://{id}")
        }),
    )
}

pub fn challenge_object(id: &str, challenger: &str) -> ChainObject {
    ChainObject::new(id, type_of("Challenge"), json!({ "challenger": challenger }))
}

pub fn player_fields(addr: &str, board: &[&str], graveyard: &[&str], life: u64) -> Value {
    json!({
        "fields": {
            "addr": addr,
            "board": board,
            "graveyard": graveyard,
            "deck_commitment": "0xdeck",
            "hand_commitment": "0xhand",
            "deck_size": "15",
            "hand_size": "5",
            "id": { "id": format!("{addr}-record") },
            "life": life.to_string()
        }
    })
}

pub fn game_object(id: &str, player_1: Value, player_2: Option<Value>, p1_turn: Option<bool>) -> ChainObject {
    let mut content = json!({ "player_1": player_1, "player_2": player_2 });
    if let Some(flag) = p1_turn {
        content["is_player_1_turn"] = json!(flag);
    }
    ChainObject::new(id, type_of("Game"), content)
}

// =============================================================================
// Chain provider
// =============================================================================

#[derive(Default)]
pub struct FakeChain {
    objects: Mutex<HashMap<ObjectId, ChainObject>>,
    owned: Mutex<HashMap<Address, Vec<ChainObject>>>,
    pub fetches: Mutex<Vec<ObjectId>>,
    pub owner_queries: Mutex<Vec<Address>>,
}

impl FakeChain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make an object fetchable by ID.
    pub fn put(&self, object: ChainObject) {
        self.objects.lock().insert(object.object_id.clone(), object);
    }

    /// Replace everything `owner` holds.
    pub fn set_owned(&self, owner: &str, objects: Vec<ChainObject>) {
        self.owned.lock().insert(Address::new(owner), objects);
    }

    pub fn fetch_count(&self, id: &str) -> usize {
        self.fetches.lock().iter().filter(|f| f.as_str() == id).count()
    }
}

#[async_trait]
impl ChainProvider for FakeChain {
    async fn get_object(&self, id: &ObjectId) -> Result<Option<ChainObject>, ClientError> {
        self.fetches.lock().push(id.clone());
        Ok(self.objects.lock().get(id).cloned())
    }

    async fn owned_objects(&self, owner: &Address) -> Result<Vec<ChainObject>, ClientError> {
        self.owner_queries.lock().push(owner.clone());
        Ok(self.owned.lock().get(owner).cloned().unwrap_or_default())
    }
}

// =============================================================================
// Wallet
// =============================================================================

pub struct FakeWallet {
    address: Address,
    objects: Mutex<Vec<ChainObject>>,
    pub calls: Mutex<Vec<MoveCall>>,
    created: Mutex<Vec<ObjectId>>,
    failing: Mutex<HashSet<String>>,
}

impl FakeWallet {
    pub fn new(address: &str) -> Arc<Self> {
        Arc::new(Self {
            address: Address::new(address),
            objects: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        })
    }

    pub fn set_objects(&self, objects: Vec<ChainObject>) {
        *self.objects.lock() = objects;
    }

    /// Objects reported as created by every later transaction.
    pub fn set_created(&self, ids: &[&str]) {
        *self.created.lock() = ids.iter().map(|id| ObjectId::new(*id)).collect();
    }

    /// Make calls to `function` fail.
    pub fn fail(&self, function: &str) {
        self.failing.lock().insert(function.to_owned());
    }

    pub fn recover(&self, function: &str) {
        self.failing.lock().remove(function);
    }

    /// Function names of every executed call, in order.
    pub fn functions(&self) -> Vec<String> {
        self.calls.lock().iter().map(|call| call.function().to_owned()).collect()
    }

    pub fn last_call(&self) -> Option<MoveCall> {
        self.calls.lock().last().cloned()
    }

    pub fn count(&self, function: &str) -> usize {
        self.functions().iter().filter(|f| *f == function).count()
    }
}

#[async_trait]
impl Wallet for FakeWallet {
    fn address(&self) -> Address {
        self.address.clone()
    }

    async fn objects(&self) -> Result<Vec<ChainObject>, ClientError> {
        Ok(self.objects.lock().clone())
    }

    async fn execute(&self, call: MoveCall) -> Result<TxReceipt, ClientError> {
        let function = call.function().to_owned();
        if self.failing.lock().contains(&function) {
            return Err(ClientError::chain(format!("{function} rejected")));
        }
        let mut calls = self.calls.lock();
        calls.push(call);
        Ok(TxReceipt {
            digest: format!("tx-{}", calls.len()),
            created: self.created.lock().clone(),
        })
    }
}

// =============================================================================
// Backend
// =============================================================================

#[derive(Default)]
pub struct FakeBackend {
    players: Mutex<BackendPlayers>,
    pub posts: Mutex<Vec<BackendPlayers>>,
}

impl FakeBackend {
    pub fn with_players(players: BackendPlayers) -> Arc<Self> {
        Arc::new(Self {
            players: Mutex::new(players),
            posts: Mutex::new(Vec::new()),
        })
    }

    pub fn set_players(&self, players: BackendPlayers) {
        *self.players.lock() = players;
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn get_players(&self) -> Result<BackendPlayers, ClientError> {
        Ok(self.players.lock().clone())
    }

    async fn post_players(&self, players: &BackendPlayers) -> Result<(), ClientError> {
        self.posts.lock().push(players.clone());
        *self.players.lock() = players.clone();
        Ok(())
    }
}

// =============================================================================
// Move call helpers
// =============================================================================

pub fn cards_arg(call: &MoveCall, index: usize) -> Vec<String> {
    match &call.arguments[index] {
        MoveArg::Cards(cards) => cards.iter().map(|c| c.as_str().to_owned()).collect(),
        other => panic!("argument {index} is not a card list: {other:?}"),
    }
}
