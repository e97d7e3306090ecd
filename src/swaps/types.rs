/// Swap request, quote and option structures used across the swap flow
use crate::config::SwapConfig;
use crate::errors::SwapError;
use crate::rpc::{Commitment, SendOptions};
use serde::{Deserialize, Serialize};
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use std::time::Duration;

/// Parameters for one quoting call. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    /// Mint address of the asset being sold
    pub from: String,
    /// Mint address of the asset being bought
    pub to: String,
    /// Amount of `from` to swap, in UI units
    pub from_amount: f64,
    /// Maximum tolerated price slippage, in percent
    pub slippage: f64,
    /// Address paying for and signing the swap
    pub payer: String,
    /// Priority fee in SOL; recommended while the network is congested
    pub priority_fee: Option<f64>,
    /// Ask the service for a legacy (non-versioned) transaction
    pub force_legacy: bool,
}

impl SwapRequest {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        from_amount: f64,
        slippage: f64,
        payer: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            from_amount,
            slippage,
            payer: payer.into(),
            priority_fee: None,
            force_legacy: false,
        }
    }

    pub fn with_priority_fee(mut self, priority_fee: f64) -> Self {
        self.priority_fee = Some(priority_fee);
        self
    }

    pub fn with_force_legacy(mut self, force_legacy: bool) -> Self {
        self.force_legacy = force_legacy;
        self
    }

    /// Reject requests the quoting service would answer with garbage
    pub fn validate(&self) -> Result<(), SwapError> {
        if self.from.trim().is_empty() {
            return Err(SwapError::invalid_request("source asset is empty"));
        }
        if self.to.trim().is_empty() {
            return Err(SwapError::invalid_request("destination asset is empty"));
        }
        if self.from == self.to {
            return Err(SwapError::invalid_request(
                "source and destination assets are identical",
            ));
        }
        if self.payer.trim().is_empty() {
            return Err(SwapError::invalid_request("payer is empty"));
        }
        if !self.from_amount.is_finite() || self.from_amount <= 0.0 {
            return Err(SwapError::invalid_request(format!(
                "amount must be a positive number, got {}",
                self.from_amount
            )));
        }
        if !self.slippage.is_finite() || self.slippage < 0.0 {
            return Err(SwapError::invalid_request(format!(
                "slippage must be a non-negative number, got {}",
                self.slippage
            )));
        }
        if let Some(fee) = self.priority_fee {
            if !fee.is_finite() || fee < 0.0 {
                return Err(SwapError::invalid_request(format!(
                    "priority fee must be a non-negative number, got {}",
                    fee
                )));
            }
        }
        Ok(())
    }
}

/// Swap instructions returned by the quoting service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapResponse {
    /// Base64-encoded unsigned transaction
    pub txn: String,
    /// Legacy-mode flag, echoed from the request
    #[serde(rename = "forceLegacy", default)]
    pub force_legacy: bool,
}

/// Options controlling transaction sending and confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct SwapOptions {
    pub send_options: SendOptions,

    /// Number of status polls before giving up
    pub confirmation_retries: u32,

    /// Deadline for the whole polling phase; `None` means polls alone bound it
    pub confirmation_retry_timeout: Option<Duration>,

    /// Blocks of slack kept before the blockhash expires; no resends inside it
    pub last_valid_block_height_buffer: u64,

    /// Commitment the transaction must reach before it counts as successful
    pub commitment: Commitment,

    /// Re-send the signed transaction this often while unconfirmed
    pub resend_interval: Option<Duration>,

    /// Wait between status polls
    pub confirmation_check_interval: Duration,

    /// Return the signature right after sending
    pub skip_confirmation_check: bool,
}

impl Default for SwapOptions {
    fn default() -> Self {
        Self::from(&SwapConfig::default())
    }
}

impl From<&SwapConfig> for SwapOptions {
    fn from(cfg: &SwapConfig) -> Self {
        let millis = |ms: u64| (ms > 0).then(|| Duration::from_millis(ms));

        Self {
            send_options: SendOptions {
                skip_preflight: cfg.skip_preflight,
                max_retries: cfg.max_retries,
                preflight_commitment: cfg.preflight_commitment,
            },
            confirmation_retries: cfg.confirmation_retries,
            confirmation_retry_timeout: millis(cfg.confirmation_retry_timeout_ms),
            last_valid_block_height_buffer: cfg.last_valid_block_height_buffer,
            commitment: cfg.commitment,
            resend_interval: millis(cfg.resend_interval_ms),
            confirmation_check_interval: Duration::from_millis(cfg.confirmation_check_interval_ms),
            skip_confirmation_check: cfg.skip_confirmation_check,
        }
    }
}

/// A quote turned into a signed transaction, ready to submit
#[derive(Debug, Clone)]
pub struct SignedSwap {
    pub transaction: VersionedTransaction,
    /// Fee-payer signature; the transaction id once accepted
    pub signature: Signature,
    /// Block height after which the attached blockhash is no longer valid
    pub last_valid_block_height: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOL: &str = "So11111111111111111111111111111111111111112";
    const TOKEN: &str = "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R";

    #[test]
    fn test_request_validation() {
        let ok = SwapRequest::new(SOL, TOKEN, 0.0001, 30.0, "payer");
        assert!(ok.validate().is_ok());

        assert!(SwapRequest::new(SOL, SOL, 1.0, 1.0, "payer").validate().is_err());
        assert!(SwapRequest::new(SOL, TOKEN, 0.0, 1.0, "payer").validate().is_err());
        assert!(SwapRequest::new(SOL, TOKEN, f64::NAN, 1.0, "payer").validate().is_err());
        assert!(SwapRequest::new(SOL, TOKEN, 1.0, -1.0, "payer").validate().is_err());
        assert!(SwapRequest::new(SOL, TOKEN, 1.0, 1.0, " ").validate().is_err());
        assert!(ok.clone().with_priority_fee(-0.1).validate().is_err());
    }

    #[test]
    fn test_response_decodes_with_missing_flag() {
        let response: SwapResponse = serde_json::from_str(r#"{"txn":"AQID"}"#).unwrap();
        assert_eq!(response.txn, "AQID");
        assert!(!response.force_legacy);

        let response: SwapResponse =
            serde_json::from_str(r#"{"txn":"AQID","forceLegacy":true,"rate":{}}"#).unwrap();
        assert!(response.force_legacy);
    }

    #[test]
    fn test_options_from_config_zero_disables() {
        let mut cfg = SwapConfig::default();
        cfg.resend_interval_ms = 0;
        cfg.confirmation_retry_timeout_ms = 0;
        cfg.max_retries = None;
        cfg.preflight_commitment = Some(Commitment::Confirmed);

        let options = SwapOptions::from(&cfg);
        assert_eq!(
            options.send_options.preflight_commitment,
            Some(Commitment::Confirmed)
        );
        assert_eq!(options.resend_interval, None);
        assert_eq!(options.confirmation_retry_timeout, None);
        assert_eq!(options.send_options.max_retries, None);
    }

    #[test]
    fn test_default_options() {
        let options = SwapOptions::default();
        assert!(options.send_options.skip_preflight);
        assert_eq!(options.send_options.max_retries, Some(5));
        assert_eq!(options.confirmation_retries, 50);
        assert_eq!(options.confirmation_retry_timeout, Some(Duration::from_secs(30)));
        assert_eq!(options.last_valid_block_height_buffer, 10);
        assert_eq!(options.send_options.preflight_commitment, None);
        assert_eq!(options.commitment, Commitment::Processed);
        assert_eq!(options.resend_interval, Some(Duration::from_millis(1500)));
        assert_eq!(options.confirmation_check_interval, Duration::from_millis(100));
        assert!(!options.skip_confirmation_check);
    }
}
