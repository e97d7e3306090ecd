//! Shared utilities for integration tests: a raw-TCP quoting service and a
//! scripted node.

use async_trait::async_trait;
use base64::Engine;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::message::{Message, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracker_swap::rpc::{
    Commitment, LatestBlockhash, NodeClient, NodeError, SendOptions, SignatureStatus,
};

/// Request lines (`GET /swap?... HTTP/1.1`) seen by a mock backend
pub type SeenRequests = Arc<Mutex<Vec<String>>>;

/// Start a mock quoting service on an ephemeral port answering every request
/// with `status` and `body`. Returns its base URL.
pub async fn start_quote_backend(status: u16, body: String) -> (String, SeenRequests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let seen: SeenRequests = Arc::new(Mutex::new(Vec::new()));
    let seen_by_server = seen.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let body = body.clone();
                    let seen = seen_by_server.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }
                        let request = String::from_utf8_lossy(&buf);
                        if let Some(line) = request.lines().next() {
                            seen.lock().unwrap().push(line.to_string());
                        }

                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (format!("http://{}", addr), seen)
}

/// Base64 unsigned legacy swap transaction paid by `payer`
#[allow(dead_code)]
pub fn unsigned_swap_txn(payer: &Pubkey) -> String {
    let instruction = Instruction::new_with_bytes(
        Pubkey::new_unique(),
        &[9, 1, 0, 0],
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(Pubkey::new_unique(), false),
        ],
    );
    let message = Message::new(&[instruction], Some(payer));
    let transaction = VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::Legacy(message),
    };
    base64::engine::general_purpose::STANDARD.encode(bincode::serialize(&transaction).unwrap())
}

/// Node answering with scripted statuses and recording what it was sent
#[allow(dead_code)]
pub struct ScriptedNode {
    pub blockhash: Hash,
    statuses: Mutex<VecDeque<Option<SignatureStatus>>>,
    pub sent: Mutex<Vec<VersionedTransaction>>,
}

#[allow(dead_code)]
impl ScriptedNode {
    pub fn new(statuses: Vec<Option<SignatureStatus>>) -> Self {
        Self {
            blockhash: Hash::new_unique(),
            statuses: Mutex::new(statuses.into_iter().collect()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn landed_at(level: Commitment) -> Option<SignatureStatus> {
        Some(SignatureStatus {
            slot: 1,
            confirmation: Some(level),
            err: None,
        })
    }
}

#[async_trait]
impl NodeClient for ScriptedNode {
    async fn get_latest_blockhash(
        &self,
        _commitment: Commitment,
    ) -> Result<LatestBlockhash, NodeError> {
        Ok(LatestBlockhash {
            blockhash: self.blockhash,
            last_valid_block_height: 10_000,
        })
    }

    async fn get_block_height(&self) -> Result<u64, NodeError> {
        Ok(5_000)
    }

    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
        _options: &SendOptions,
    ) -> Result<Signature, NodeError> {
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }

    async fn get_signature_status(
        &self,
        _signature: &Signature,
    ) -> Result<Option<SignatureStatus>, NodeError> {
        Ok(self.statuses.lock().unwrap().pop_front().flatten())
    }
}
