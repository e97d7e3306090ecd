//! Network node capability
//!
//! The swap flow talks to a node through the `NodeClient` trait only:
//! fetch a recent blockhash, send a signed transaction, query its status.
//! `SolanaRpcNode` backs it with the Solana JSON-RPC client; tests supply
//! their own implementations.

mod client;
mod types;

pub use client::SolanaRpcNode;
pub use types::{Commitment, SendOptions, SignatureStatus};

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use thiserror::Error;

/// Failure reported by a node collaborator
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NodeError {
    /// The request never got a usable answer (connection, timeout, HTTP)
    #[error("transport failure: {0}")]
    Transport(String),
    /// The node answered and refused the request
    #[error("rejected: {0}")]
    Rejected(String),
    /// The node answered with something we could not interpret
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Recent chain reference point attached to a transaction before signing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestBlockhash {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Latest blockhash at the given commitment plus its expiry height
    async fn get_latest_blockhash(
        &self,
        commitment: Commitment,
    ) -> Result<LatestBlockhash, NodeError>;

    /// Current block height
    async fn get_block_height(&self) -> Result<u64, NodeError>;

    /// Submit a signed transaction once
    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
        options: &SendOptions,
    ) -> Result<Signature, NodeError>;

    /// Status of a single signature; `None` while the node has not seen it
    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<SignatureStatus>, NodeError>;
}
