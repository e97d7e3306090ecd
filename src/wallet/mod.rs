/// Local signer capability and keypair loading
///
/// The swap flow only needs two things from a wallet: its public key, and a
/// signature over a message for a specific required-signer slot. Anything that
/// can do that implements `TransactionSigner`.
use crate::errors::SwapError;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};

/// Expected length of an ed25519 secret+public keypair
const KEYPAIR_LENGTH: usize = 64;

pub trait TransactionSigner: Send + Sync {
    /// Public key of the held private key
    fn pubkey(&self) -> Pubkey;

    /// Sign `message` for `required_signer`, or `None` if the key is not ours
    fn try_sign(&self, required_signer: &Pubkey, message: &[u8]) -> Option<Signature>;
}

/// `TransactionSigner` backed by an in-memory keypair
pub struct KeypairSigner {
    keypair: Keypair,
}

impl KeypairSigner {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn from_private_key(private_key: &str) -> Result<Self, SwapError> {
        parse_keypair(private_key).map(Self::new)
    }
}

impl TransactionSigner for KeypairSigner {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    fn try_sign(&self, required_signer: &Pubkey, message: &[u8]) -> Option<Signature> {
        if *required_signer != self.keypair.pubkey() {
            return None;
        }
        Some(self.keypair.sign_message(message))
    }
}

/// Parse a private key in base58 or `[1,2,3,...]` array form
pub fn parse_keypair(private_key: &str) -> Result<Keypair, SwapError> {
    let private_key = private_key.trim();

    if private_key.is_empty() {
        return Err(SwapError::config("wallet private key is empty"));
    }

    if private_key.starts_with('[') && private_key.ends_with(']') {
        load_keypair_from_array_format(private_key)
    } else {
        load_keypair_from_base58(private_key)
    }
}

/// Load a keypair from the standard base58 wallet export format
pub fn load_keypair_from_base58(private_key: &str) -> Result<Keypair, SwapError> {
    let decoded = bs58::decode(private_key)
        .into_vec()
        .map_err(|e| SwapError::config(format!("Failed to decode base58 private key: {}", e)))?;

    keypair_from_bytes(&decoded)
}

fn load_keypair_from_array_format(private_key: &str) -> Result<Keypair, SwapError> {
    let inner = private_key.trim_start_matches('[').trim_end_matches(']');

    let bytes: Vec<u8> = inner
        .split(',')
        .map(|s| s.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|e| SwapError::config(format!("Failed to parse private key array: {}", e)))?;

    keypair_from_bytes(&bytes)
}

fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair, SwapError> {
    if bytes.len() != KEYPAIR_LENGTH {
        return Err(SwapError::config(format!(
            "Invalid private key length: expected {} bytes, got {}",
            KEYPAIR_LENGTH,
            bytes.len()
        )));
    }

    Keypair::try_from(bytes)
        .map_err(|e| SwapError::config(format!("Failed to create keypair: {}", e)))
}
