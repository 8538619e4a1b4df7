//! Collaborator traits for the chain data provider and the signing wallet.
//!
//! The client never talks to a node directly. Hosts plug in whatever SDK
//! they use (a JSON-RPC client, a browser wallet bridge) behind these traits.
//!
//! ## Implementation Notes
//!
//! - `get_object`: `Ok(None)` for an unknown ID, `Err` only when the call failed
//! - `owned_objects`: objects carry their `fields` map as `content`
//! - `execute`: resolves once the transaction is final; no internal retry

use async_trait::async_trait;

use super::object::ChainObject;
use crate::core::{Address, MoveCall, ObjectId, TxReceipt};
use crate::error::ClientError;

/// Read access to chain objects.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Fetch one object with its content.
    async fn get_object(&self, id: &ObjectId) -> Result<Option<ChainObject>, ClientError>;

    /// Fetch every object owned by an address, with type and content.
    async fn owned_objects(&self, owner: &Address) -> Result<Vec<ChainObject>, ClientError>;
}

/// The connected wallet: identity, holdings and transaction submission.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Address of the connected account.
    fn address(&self) -> Address;

    /// Objects currently held by the wallet.
    async fn objects(&self) -> Result<Vec<ChainObject>, ClientError>;

    /// Sign and execute a single Move call.
    async fn execute(&self, call: MoveCall) -> Result<TxReceipt, ClientError>;
}
