/// Swap flow: quote → decode → blockhash → sign → send → confirm
///
/// `SwapClient` wires the three collaborators together: the quoting service
/// (`QuoteClient`), a network node (`NodeClient`) and the local signer
/// (`TransactionSigner`). Each step is also usable on its own.
pub mod quote;
pub mod submitter;
pub mod transaction;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use quote::{build_swap_url, QuoteClient};
pub use submitter::{submit_and_confirm, SubmissionReport, SubmissionState};
pub use transaction::{attach_blockhash, decode_swap_transaction, sign_transaction};
pub use types::{SignedSwap, SwapOptions, SwapRequest, SwapResponse};

use crate::config::Config;
use crate::errors::SwapError;
use crate::logger::{self, LogTag};
use crate::rpc::{NodeClient, SolanaRpcNode};
use crate::wallet::{KeypairSigner, TransactionSigner};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use std::time::Duration;

pub struct SwapClient<N = SolanaRpcNode, S = KeypairSigner> {
    quote_client: QuoteClient,
    node: N,
    signer: S,
}

impl SwapClient<SolanaRpcNode, KeypairSigner> {
    /// Client against `rpc_url` and the default quoting service
    pub fn new(keypair: Keypair, rpc_url: &str) -> Self {
        Self::with_parts(
            QuoteClient::new(crate::constants::DEFAULT_SWAP_API_URL),
            SolanaRpcNode::new(rpc_url),
            KeypairSigner::new(keypair),
        )
    }

    /// Client built from `[rpc]`, `[quote]` and the wallet key
    pub fn from_config(config: &Config) -> Result<Self, SwapError> {
        let private_key = crate::config::wallet_private_key(config)?;
        let signer = KeypairSigner::from_private_key(&private_key)?;

        Ok(Self::with_parts(
            QuoteClient::with_timeout(
                config.quote.base_url.clone(),
                Duration::from_secs(config.quote.timeout_secs),
            ),
            SolanaRpcNode::new(&config.rpc.url),
            signer,
        ))
    }
}

impl<N, S> SwapClient<N, S>
where
    N: NodeClient,
    S: TransactionSigner,
{
    pub fn with_parts(quote_client: QuoteClient, node: N, signer: S) -> Self {
        Self {
            quote_client,
            node,
            signer,
        }
    }

    /// Public key of the local signer, the usual `payer` of a request
    pub fn payer(&self) -> Pubkey {
        self.signer.pubkey()
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn quote_client(&self) -> &QuoteClient {
        &self.quote_client
    }

    /// Ask the quoting service for an unsigned swap transaction
    pub async fn get_swap_instructions(
        &self,
        request: &SwapRequest,
    ) -> Result<SwapResponse, SwapError> {
        self.quote_client.fetch_quote(request).await
    }

    /// Decode the quote, attach a fresh blockhash and sign it
    pub async fn build_and_sign(&self, quote: &SwapResponse) -> Result<SignedSwap, SwapError> {
        transaction::build_and_sign(quote, &self.node, &self.signer).await
    }

    /// Sign, send and confirm `quote`; returns the transaction signature
    pub async fn perform_swap(
        &self,
        quote: &SwapResponse,
        options: &SwapOptions,
    ) -> Result<Signature, SwapError> {
        self.perform_swap_with_report(quote, options)
            .await
            .map(|report| report.signature)
    }

    /// Like `perform_swap`, keeping the poll/resend counts and timing
    pub async fn perform_swap_with_report(
        &self,
        quote: &SwapResponse,
        options: &SwapOptions,
    ) -> Result<SubmissionReport, SwapError> {
        let signed = self.build_and_sign(quote).await?;

        match submit_and_confirm(&self.node, &signed, options).await {
            Ok(report) => {
                logger::info(
                    LogTag::Swap,
                    &format!(
                        "Swap {} {} in {:.2}s ({} polls, {} resends)",
                        report.signature,
                        if report.verified { "confirmed" } else { "sent" },
                        report.elapsed.as_secs_f64(),
                        report.polls,
                        report.resends
                    ),
                );
                Ok(report)
            }
            Err(e) => {
                logger::error(
                    LogTag::Swap,
                    &format!("Swap failed [{}]: {}", e.kind_name(), e),
                );
                Err(e)
            }
        }
    }
}
