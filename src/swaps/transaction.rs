/// Turning a quote payload into a signed transaction
///
/// decode (base64 → bincode) → attach finalized blockhash → sign every
/// required signer slot with the local key.
use super::types::{SignedSwap, SwapResponse};
use crate::errors::SwapError;
use crate::logger::{self, LogTag};
use crate::rpc::{Commitment, NodeClient};
use crate::wallet::TransactionSigner;
use base64::Engine;
use solana_sdk::hash::Hash;
use solana_sdk::message::VersionedMessage;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;

/// Decode the base64 payload into a legacy or v0 transaction
pub fn decode_swap_transaction(txn: &str) -> Result<VersionedTransaction, SwapError> {
    let txn = txn.trim();
    if txn.is_empty() {
        return Err(SwapError::decode(
            "swap transaction",
            "quote carried an empty transaction payload",
        ));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(txn)
        .map_err(|e| SwapError::decode("base64 transaction payload", e))?;

    let transaction: VersionedTransaction = bincode::deserialize(&bytes)
        .map_err(|e| SwapError::decode("swap transaction", e))?;

    let required = transaction.message.header().num_required_signatures as usize;
    let keys = transaction.message.static_account_keys().len();
    if required == 0 || required > keys {
        return Err(SwapError::decode(
            "swap transaction",
            format!(
                "message declares {} required signers over {} account keys",
                required, keys
            ),
        ));
    }

    Ok(transaction)
}

pub fn attach_blockhash(transaction: &mut VersionedTransaction, blockhash: Hash) {
    transaction.message.set_recent_blockhash(blockhash);
}

/// Sign all required signer slots; returns the fee-payer signature
///
/// Every slot must be satisfiable by `signer`: after a blockhash swap any
/// signature made by someone else is invalid anyway.
pub fn sign_transaction<S>(
    transaction: &mut VersionedTransaction,
    signer: &S,
) -> Result<Signature, SwapError>
where
    S: TransactionSigner + ?Sized,
{
    let required = transaction.message.header().num_required_signatures as usize;
    let message_bytes = transaction.message.serialize();

    let signatures = transaction
        .message
        .static_account_keys()
        .iter()
        .take(required)
        .map(|key| {
            signer.try_sign(key, &message_bytes).ok_or_else(|| {
                SwapError::signing(format!(
                    "no local key for required signer {} (local key is {})",
                    key,
                    signer.pubkey()
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let fee_payer = *signatures
        .first()
        .ok_or_else(|| SwapError::signing("transaction has no required signers"))?;

    transaction.signatures = signatures;
    Ok(fee_payer)
}

/// Decode, refresh and sign the transaction carried by `quote`
pub async fn build_and_sign<N, S>(
    quote: &SwapResponse,
    node: &N,
    signer: &S,
) -> Result<SignedSwap, SwapError>
where
    N: NodeClient + ?Sized,
    S: TransactionSigner + ?Sized,
{
    let mut transaction = decode_swap_transaction(&quote.txn)?;

    if quote.force_legacy && matches!(transaction.message, VersionedMessage::V0(_)) {
        logger::warning(
            LogTag::Swap,
            "Legacy transaction was requested but the quote carries a v0 message",
        );
    }

    let latest = node
        .get_latest_blockhash(Commitment::Finalized)
        .await
        .map_err(|e| SwapError::network("fetching latest blockhash", e))?;

    attach_blockhash(&mut transaction, latest.blockhash);
    let signature = sign_transaction(&mut transaction, signer)?;

    logger::debug(
        LogTag::Wallet,
        &format!(
            "Signed swap transaction {} with blockhash {} (valid until height {})",
            signature, latest.blockhash, latest.last_valid_block_height
        ),
    );

    Ok(SignedSwap {
        transaction,
        signature,
        last_valid_block_height: latest.last_valid_block_height,
    })
}
