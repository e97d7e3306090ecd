/// Configuration schemas, one `config_struct!` per TOML section
use crate::config_struct;
use crate::constants::{DEFAULT_RPC_URL, DEFAULT_SWAP_API_URL, QUOTE_TIMEOUT_SECS};
use crate::rpc::Commitment;

// ============================================================================
// WALLET
// ============================================================================

config_struct! {
    pub struct WalletConfig {
        /// Base58 secret key (or `[1,2,...]` byte array); the environment
        /// variable TRACKER_SWAP_PRIVATE_KEY takes precedence
        private_key: String = String::new(),
    }
}

// ============================================================================
// RPC
// ============================================================================

config_struct! {
    pub struct RpcConfig {
        url: String = DEFAULT_RPC_URL.to_string(),
    }
}

// ============================================================================
// QUOTE API
// ============================================================================

config_struct! {
    pub struct QuoteConfig {
        base_url: String = DEFAULT_SWAP_API_URL.to_string(),
        timeout_secs: u64 = QUOTE_TIMEOUT_SECS,
    }
}

// ============================================================================
// SUBMISSION
// ============================================================================

config_struct! {
    /// Sending and confirmation options; durations in milliseconds, 0 disables
    pub struct SwapConfig {
        skip_preflight: bool = true,
        /// Node-side rebroadcast attempts; absent means 5
        max_retries: Option<usize> = Some(5),
        /// Commitment for preflight simulation; absent leaves the node default
        preflight_commitment: Option<Commitment> = None,

        // Confirmation polling
        confirmation_retries: u32 = 50,
        confirmation_retry_timeout_ms: u64 = 30_000,
        confirmation_check_interval_ms: u64 = 100,
        commitment: Commitment = Commitment::Processed,
        skip_confirmation_check: bool = false,

        // Rebroadcast while unconfirmed
        resend_interval_ms: u64 = 1_500,
        /// Resends stop this many blocks before the blockhash expires; must
        /// stay well under the ~150 block validity of a finalized blockhash
        last_valid_block_height_buffer: u64 = 10,
    }
}

// ============================================================================
// ROOT
// ============================================================================

config_struct! {
    pub struct Config {
        wallet: WalletConfig = WalletConfig::default(),
        rpc: RpcConfig = RpcConfig::default(),
        quote: QuoteConfig = QuoteConfig::default(),
        swap: SwapConfig = SwapConfig::default(),
    }
}
