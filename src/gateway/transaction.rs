//! Transaction assembly and submission.
//!
//! # Responsibilities
//! - Resolve fresh network parameters for every submission
//! - Build the submission body from a signed transfer
//! - Broadcast it exactly once and return the transaction hash
//!
//! Submissions are never retried; a failed POST is reported to the caller,
//! who decides whether re-sending is safe.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::gateway::client::GatewayClient;
use crate::gateway::types::{
    GatewayError, GatewayResult, NetworkConfig, SubmissionResult, TransactionType,
    TransferOperation,
};

#[derive(Deserialize)]
struct SendResponse {
    data: SendData,
}

#[derive(Deserialize)]
struct SendData {
    #[serde(rename = "txHash")]
    tx_hash: String,
}

/// Submits signed transfers through the gateway.
#[derive(Debug, Clone)]
pub struct TxSubmitter {
    client: GatewayClient,
}

impl TxSubmitter {
    /// Create a new submitter.
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    /// Submit a signed transfer.
    ///
    /// Reads `/network/config`, then posts to `/transaction/send`. Nothing
    /// is cached between calls.
    pub async fn submit(
        &self,
        operation: &TransferOperation,
        signature: &str,
        sign_using_hash: bool,
    ) -> GatewayResult<SubmissionResult> {
        // Reject unusable operations before touching the network
        parties(operation)?;

        let network = self.client.get_network_config().await?;
        let tx_type = TransactionType::from_sign_using_hash(sign_using_hash);
        let body = build_submission_body(operation, &network, signature, tx_type)?;

        let response: SendResponse = self
            .client
            .transport()
            .post("transaction_send", &["transaction", "send"], &body)
            .await?;

        tracing::info!(
            tx_hash = %response.data.tx_hash,
            nonce = operation.transaction_sequence_number,
            chain_id = %network.chain_id,
            tx_type = ?tx_type,
            "Transaction submitted"
        );

        Ok(SubmissionResult {
            hash: response.data.tx_hash,
        })
    }
}

/// First sender and first recipient of an operation.
fn parties(operation: &TransferOperation) -> GatewayResult<(&str, &str)> {
    let sender = operation
        .senders
        .first()
        .ok_or_else(|| GatewayError::InvalidOperation("no sender".to_string()))?;
    let receiver = operation
        .recipients
        .first()
        .ok_or_else(|| GatewayError::InvalidOperation("no recipient".to_string()))?;
    Ok((sender.as_str(), receiver.as_str()))
}

/// Build the JSON body posted to `/transaction/send`.
///
/// Base fields are written first and the transaction type fields last, so
/// a type field shadows a base field of the same name.
pub fn build_submission_body(
    operation: &TransferOperation,
    network: &NetworkConfig,
    signature: &str,
    tx_type: TransactionType,
) -> GatewayResult<Map<String, Value>> {
    let (sender, receiver) = parties(operation)?;

    let mut body = Map::new();
    body.insert("nonce".to_string(), Value::from(operation.transaction_sequence_number));
    body.insert("value".to_string(), Value::from(operation.value.as_str()));
    body.insert("receiver".to_string(), Value::from(receiver));
    body.insert("sender".to_string(), Value::from(sender));
    body.insert("gasPrice".to_string(), Value::from(network.gas_price));
    body.insert("gasLimit".to_string(), Value::from(network.gas_limit));
    body.insert("chainID".to_string(), Value::from(network.chain_id.as_str()));
    body.insert("signature".to_string(), Value::from(signature));

    merge_fields(&mut body, tx_type.payload());
    Ok(body)
}

/// Apply `overlay` onto `base`; overlay values win.
pub fn merge_fields(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        base.insert(key, value);
    }
}
