//! Test doubles shared by the swap module tests

use crate::rpc::{
    Commitment, LatestBlockhash, NodeClient, NodeError, SendOptions, SignatureStatus,
};
use async_trait::async_trait;
use base64::Engine;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::message::{v0, Message, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use tokio::time::Instant;

fn swap_instruction(signers: &[Pubkey]) -> Instruction {
    let mut accounts: Vec<AccountMeta> = signers
        .iter()
        .map(|key| AccountMeta::new(*key, true))
        .collect();
    accounts.push(AccountMeta::new(Pubkey::new_unique(), false));
    Instruction::new_with_bytes(Pubkey::new_unique(), &[9, 1, 0, 0], accounts)
}

/// Unsigned legacy transaction whose required signers are `signers`, payer first
pub fn legacy_swap_transaction(signers: &[Pubkey]) -> VersionedTransaction {
    let message = Message::new(&[swap_instruction(signers)], signers.first());
    let required = message.header.num_required_signatures as usize;
    VersionedTransaction {
        signatures: vec![Signature::default(); required],
        message: VersionedMessage::Legacy(message),
    }
}

/// Unsigned v0 transaction paid and signed by `payer`
pub fn v0_swap_transaction(payer: &Pubkey) -> VersionedTransaction {
    let message = v0::Message::try_compile(payer, &[swap_instruction(&[*payer])], &[], Hash::default())
        .expect("compile v0 message");
    VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::V0(message),
    }
}

pub fn encode_transaction(transaction: &VersionedTransaction) -> String {
    let bytes = bincode::serialize(transaction).expect("serialize transaction");
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub fn status(level: Commitment) -> SignatureStatus {
    SignatureStatus {
        slot: 100,
        confirmation: Some(level),
        err: None,
    }
}

pub fn failed_status(error: &str) -> SignatureStatus {
    SignatureStatus {
        slot: 100,
        confirmation: Some(Commitment::Processed),
        err: Some(error.to_string()),
    }
}

/// Scripted `NodeClient` recording every call it receives
pub struct MockNode {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
    fail_blockhash: bool,
    fail_block_height: bool,
    statuses: Mutex<VecDeque<Result<Option<SignatureStatus>, NodeError>>>,
    send_results: Mutex<VecDeque<Result<(), NodeError>>>,
    block_heights: Mutex<VecDeque<u64>>,
    current_block_height: u64,
    sends: AtomicU32,
    polls: AtomicU32,
    height_queries: AtomicU32,
    blockhash_commitments: Mutex<Vec<Commitment>>,
    poll_times: Mutex<Vec<Instant>>,
}

impl MockNode {
    pub fn new() -> Self {
        Self {
            blockhash: Hash::new_unique(),
            last_valid_block_height: 1_000,
            fail_blockhash: false,
            fail_block_height: false,
            statuses: Mutex::new(VecDeque::new()),
            send_results: Mutex::new(VecDeque::new()),
            block_heights: Mutex::new(VecDeque::new()),
            current_block_height: 500,
            sends: AtomicU32::new(0),
            polls: AtomicU32::new(0),
            height_queries: AtomicU32::new(0),
            blockhash_commitments: Mutex::new(Vec::new()),
            poll_times: Mutex::new(Vec::new()),
        }
    }

    /// Statuses returned by successive polls; `Ok(None)` once exhausted
    pub fn with_statuses(self, statuses: Vec<Option<SignatureStatus>>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into_iter().map(Ok).collect();
        self
    }

    pub fn with_status_results(
        self,
        results: Vec<Result<Option<SignatureStatus>, NodeError>>,
    ) -> Self {
        *self.statuses.lock().unwrap() = results.into_iter().collect();
        self
    }

    /// Results of successive sends; `Ok` once exhausted
    pub fn with_send_results(self, results: Vec<Result<(), NodeError>>) -> Self {
        *self.send_results.lock().unwrap() = results.into_iter().collect();
        self
    }

    /// Block heights reported by successive queries; the last one repeats
    pub fn with_block_heights(mut self, heights: Vec<u64>) -> Self {
        if let Some(last) = heights.last() {
            self.current_block_height = *last;
        }
        *self.block_heights.lock().unwrap() = heights.into_iter().collect();
        self
    }

    pub fn with_last_valid_block_height(mut self, height: u64) -> Self {
        self.last_valid_block_height = height;
        self
    }

    pub fn failing_blockhash(mut self) -> Self {
        self.fail_blockhash = true;
        self
    }

    pub fn failing_block_height(mut self) -> Self {
        self.fail_block_height = true;
        self
    }

    pub fn sends(&self) -> u32 {
        self.sends.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn height_queries(&self) -> u32 {
        self.height_queries.load(Ordering::SeqCst)
    }

    pub fn blockhash_commitments(&self) -> Vec<Commitment> {
        self.blockhash_commitments.lock().unwrap().clone()
    }

    pub fn poll_times(&self) -> Vec<Instant> {
        self.poll_times.lock().unwrap().clone()
    }
}

#[async_trait]
impl NodeClient for MockNode {
    async fn get_latest_blockhash(
        &self,
        commitment: Commitment,
    ) -> Result<LatestBlockhash, NodeError> {
        self.blockhash_commitments.lock().unwrap().push(commitment);
        if self.fail_blockhash {
            return Err(NodeError::Transport("connection refused".to_string()));
        }
        Ok(LatestBlockhash {
            blockhash: self.blockhash,
            last_valid_block_height: self.last_valid_block_height,
        })
    }

    async fn get_block_height(&self) -> Result<u64, NodeError> {
        self.height_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_block_height {
            return Err(NodeError::Transport("connection reset".to_string()));
        }
        Ok(self
            .block_heights
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.current_block_height))
    }

    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
        _options: &SendOptions,
    ) -> Result<Signature, NodeError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        let result = self.send_results.lock().unwrap().pop_front().unwrap_or(Ok(()));
        result.map(|_| transaction.signatures.first().copied().unwrap_or_default())
    }

    async fn get_signature_status(
        &self,
        _signature: &Signature,
    ) -> Result<Option<SignatureStatus>, NodeError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        self.poll_times.lock().unwrap().push(Instant::now());
        self.statuses.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}
