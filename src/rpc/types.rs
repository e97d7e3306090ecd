//! Node-facing value types shared by the submitter and the RPC client

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
use solana_transaction_status::{TransactionConfirmationStatus, TransactionStatus};
use std::fmt;
use std::str::FromStr;

/// Degree of cluster finality, ordered `Processed < Confirmed < Finalized`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }

    /// Whether a reported level satisfies this threshold
    pub fn is_reached_by(&self, reported: Commitment) -> bool {
        reported >= *self
    }
}

impl Default for Commitment {
    fn default() -> Self {
        Commitment::Finalized
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Commitment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "processed" => Ok(Commitment::Processed),
            "confirmed" => Ok(Commitment::Confirmed),
            "finalized" => Ok(Commitment::Finalized),
            other => Err(format!(
                "unknown commitment '{}' (expected processed, confirmed or finalized)",
                other
            )),
        }
    }
}

impl From<TransactionConfirmationStatus> for Commitment {
    fn from(status: TransactionConfirmationStatus) -> Self {
        match status {
            TransactionConfirmationStatus::Processed => Commitment::Processed,
            TransactionConfirmationStatus::Confirmed => Commitment::Confirmed,
            TransactionConfirmationStatus::Finalized => Commitment::Finalized,
        }
    }
}

impl From<Commitment> for CommitmentLevel {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Processed => CommitmentLevel::Processed,
            Commitment::Confirmed => CommitmentLevel::Confirmed,
            Commitment::Finalized => CommitmentLevel::Finalized,
        }
    }
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        CommitmentConfig {
            commitment: commitment.into(),
        }
    }
}

/// Status of a submitted signature as reported by the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureStatus {
    /// Slot the transaction was processed in
    pub slot: u64,
    /// Highest confirmation level reached so far
    pub confirmation: Option<Commitment>,
    /// Transaction-level execution error, if the transaction failed
    pub err: Option<String>,
}

impl SignatureStatus {
    pub fn is_failed(&self) -> bool {
        self.err.is_some()
    }

    pub fn reaches(&self, threshold: Commitment) -> bool {
        self.confirmation
            .map(|level| threshold.is_reached_by(level))
            .unwrap_or(false)
    }
}

impl From<TransactionStatus> for SignatureStatus {
    fn from(status: TransactionStatus) -> Self {
        let confirmation = Some(status.confirmation_status().into());
        Self {
            slot: status.slot,
            confirmation,
            err: status.err.map(|e| e.to_string()),
        }
    }
}

/// Options applied to every `sendTransaction` call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SendOptions {
    /// Skip node-side simulation before acceptance
    pub skip_preflight: bool,
    /// Node-level rebroadcast attempts; `None` leaves the node default
    pub max_retries: Option<usize>,
    /// Commitment used for preflight simulation
    pub preflight_commitment: Option<Commitment>,
}
