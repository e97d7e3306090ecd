/// Global constants for the swap client

/// Wrapped SOL mint address
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Default quoting service base URL
pub const DEFAULT_SWAP_API_URL: &str = "https://swap-v2.solanatracker.io";

/// Path of the swap-instructions endpoint under the base URL
pub const SWAP_API_PATH: &str = "swap";

/// Default RPC node
pub const DEFAULT_RPC_URL: &str = "https://solana-rpc.publicnode.com";

/// Quote request timeout (seconds)
pub const QUOTE_TIMEOUT_SECS: u64 = 15;

/// Environment variable overriding the configured wallet private key
pub const PRIVATE_KEY_ENV: &str = "TRACKER_SWAP_PRIVATE_KEY";

/// Explorer URL prefix for printed transaction links
pub const EXPLORER_TX_URL: &str = "https://solscan.io/tx/";
