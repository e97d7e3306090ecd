pub mod arguments;
pub mod config;
pub mod constants;
pub mod errors; // Structured error handling
pub mod logger;
pub mod rpc;
pub mod swaps;
pub mod wallet; // Local signer

pub use errors::SwapError;
pub use swaps::{SwapClient, SwapOptions, SwapRequest, SwapResponse};
