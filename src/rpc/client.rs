//! `NodeClient` over the Solana nonblocking JSON-RPC client

use super::{Commitment, LatestBlockhash, NodeClient, NodeError, SendOptions, SignatureStatus};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;

pub struct SolanaRpcNode {
    client: RpcClient,
}

impl SolanaRpcNode {
    pub fn new(rpc_url: &str) -> Self {
        Self {
            client: RpcClient::new_with_commitment(
                rpc_url.to_string(),
                CommitmentConfig::confirmed(),
            ),
        }
    }
}

/// Separate node refusals from transport trouble
fn map_client_error(err: ClientError) -> NodeError {
    match err.kind() {
        ClientErrorKind::RpcError(_)
        | ClientErrorKind::TransactionError(_)
        | ClientErrorKind::SigningError(_) => NodeError::Rejected(err.to_string()),
        ClientErrorKind::SerdeJson(_) => NodeError::InvalidResponse(err.to_string()),
        _ => NodeError::Transport(err.to_string()),
    }
}

#[async_trait]
impl NodeClient for SolanaRpcNode {
    async fn get_latest_blockhash(
        &self,
        commitment: Commitment,
    ) -> Result<LatestBlockhash, NodeError> {
        let (blockhash, last_valid_block_height) = self
            .client
            .get_latest_blockhash_with_commitment(commitment.into())
            .await
            .map_err(map_client_error)?;

        logger::debug(
            LogTag::Rpc,
            &format!(
                "Latest {} blockhash {} (valid until height {})",
                commitment, blockhash, last_valid_block_height
            ),
        );

        Ok(LatestBlockhash {
            blockhash,
            last_valid_block_height,
        })
    }

    async fn get_block_height(&self) -> Result<u64, NodeError> {
        self.client
            .get_block_height()
            .await
            .map_err(map_client_error)
    }

    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
        options: &SendOptions,
    ) -> Result<Signature, NodeError> {
        let config = RpcSendTransactionConfig {
            skip_preflight: options.skip_preflight,
            preflight_commitment: options.preflight_commitment.map(Into::into),
            max_retries: options.max_retries,
            ..Default::default()
        };

        self.client
            .send_transaction_with_config(transaction, config)
            .await
            .map_err(map_client_error)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<SignatureStatus>, NodeError> {
        let response = self
            .client
            .get_signature_statuses(&[*signature])
            .await
            .map_err(map_client_error)?;

        let status = response
            .value
            .into_iter()
            .next()
            .ok_or_else(|| {
                NodeError::InvalidResponse("getSignatureStatuses returned no entries".to_string())
            })?;

        Ok(status.map(SignatureStatus::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::rpc_request::RpcError;
    use solana_sdk::transaction::TransactionError;

    #[test]
    fn test_node_refusals_are_rejections() {
        let rpc = ClientError::from(ClientErrorKind::RpcError(RpcError::ForUser(
            "blockhash not found".to_string(),
        )));
        assert!(matches!(map_client_error(rpc), NodeError::Rejected(m) if m.contains("blockhash not found")));

        let tx = ClientError::from(ClientErrorKind::TransactionError(
            TransactionError::AlreadyProcessed,
        ));
        assert!(matches!(map_client_error(tx), NodeError::Rejected(_)));
    }

    #[test]
    fn test_unreadable_answers_are_invalid_responses() {
        let serde_err = serde_json::from_str::<u64>("not json").unwrap_err();
        let err = ClientError::from(ClientErrorKind::SerdeJson(serde_err));
        assert!(matches!(map_client_error(err), NodeError::InvalidResponse(_)));
    }

    #[test]
    fn test_everything_else_is_transport() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        assert!(matches!(
            map_client_error(ClientError::from(ClientErrorKind::Io(io))),
            NodeError::Transport(_)
        ));
        assert!(matches!(
            map_client_error(ClientError::from(ClientErrorKind::Custom("timed out".into()))),
            NodeError::Transport(_)
        ));
    }
}
