/// Structured error handling for the swap flow
///
/// Every failure of a swap invocation surfaces as one `SwapError`, carrying the
/// originating cause where one exists. Only the confirmation poll loop recovers
/// internally; everything else propagates straight to the caller.
use crate::rpc::NodeError;
use solana_sdk::signature::Signature;
use thiserror::Error;

/// Boxed cause attached to network and decode failures
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Maximum number of body characters kept in `HttpStatus` errors
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum SwapError {
    // =========================================================================
    // Transport
    // =========================================================================
    #[error("Network error while {operation}: {source}")]
    Network {
        operation: &'static str,
        #[source]
        source: BoxedCause,
    },

    #[error("HTTP {status} from {endpoint}: {body}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    // =========================================================================
    // Payload handling
    // =========================================================================
    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: BoxedCause,
    },

    #[error("Signing failed: {reason}")]
    Signing { reason: String },

    // =========================================================================
    // Submission and confirmation
    // =========================================================================
    #[error("Transaction rejected by node: {source}")]
    Submission {
        #[source]
        source: NodeError,
    },

    #[error("Transaction {signature} failed on-chain: {error}")]
    Confirmation { signature: Signature, error: String },

    #[error("Transaction {signature} confirmation timed out after {polls} polls ({elapsed_ms}ms)")]
    Timeout {
        signature: Signature,
        polls: u32,
        elapsed_ms: u64,
    },

    #[error(
        "Transaction {signature} blockhash expired (block height {block_height} > last valid {last_valid_block_height})"
    )]
    BlockhashExpired {
        signature: Signature,
        block_height: u64,
        last_valid_block_height: u64,
    },

    // =========================================================================
    // Caller input
    // =========================================================================
    #[error("Invalid swap request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl SwapError {
    pub fn network<E>(operation: &'static str, source: E) -> Self
    where
        E: Into<BoxedCause>,
    {
        SwapError::Network {
            operation,
            source: source.into(),
        }
    }

    pub fn decode<E>(what: &'static str, source: E) -> Self
    where
        E: Into<BoxedCause>,
    {
        SwapError::Decode {
            what,
            source: source.into(),
        }
    }

    pub fn signing(reason: impl Into<String>) -> Self {
        SwapError::Signing {
            reason: reason.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        SwapError::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        SwapError::Config {
            reason: reason.into(),
        }
    }

    /// Build an `HttpStatus` error, keeping only the head of the body
    pub fn http_status(endpoint: impl Into<String>, status: u16, body: &str) -> Self {
        let body: String = if body.chars().count() > MAX_ERROR_BODY_CHARS {
            let head: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            format!("{}...", head)
        } else if body.is_empty() {
            "No body".to_string()
        } else {
            body.to_string()
        };

        SwapError::HttpStatus {
            endpoint: endpoint.into(),
            status,
            body,
        }
    }

    /// Both ways the confirmation loop can give up without a verdict
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            SwapError::Timeout { .. } | SwapError::BlockhashExpired { .. }
        )
    }

    /// Short classification used in log lines
    pub fn kind_name(&self) -> &'static str {
        match self {
            SwapError::Network { .. } | SwapError::HttpStatus { .. } => "NETWORK",
            SwapError::Decode { .. } => "DECODE",
            SwapError::Signing { .. } => "SIGNING",
            SwapError::Submission { .. } => "SUBMISSION",
            SwapError::Confirmation { .. } => "CONFIRMATION",
            SwapError::Timeout { .. } | SwapError::BlockhashExpired { .. } => "TIMEOUT",
            SwapError::InvalidRequest { .. } => "INVALID_REQUEST",
            SwapError::Config { .. } => "CONFIG",
        }
    }
}
