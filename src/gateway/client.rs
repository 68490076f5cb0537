//! Gateway client: one-call reads against the REST gateway.
//!
//! # Responsibilities
//! - Resolve network configuration for transaction pricing
//! - Resolve the block that confirmed a transaction
//! - Account, validator, chain height and transaction list lookups
//!
//! Every read propagates transport and shape errors unchanged, except
//! [`GatewayClient::get_validators`], which documents its own policy.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::gateway::transport::{HttpTransport, Query};
use crate::gateway::types::{
    AccountDetails, ApiConfig, ConfirmedTransaction, GatewayError, GatewayResult, NetworkConfig,
    METACHAIN_SHARD,
};

/// Raw transaction record as returned by the list endpoint.
pub type RawTransaction = Map<String, Value>;

/// Standard `{ "data": ... }` wrapper used by the gateway.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct NetworkConfigData {
    config: NetworkConfig,
}

#[derive(Deserialize)]
struct TransactionData {
    transaction: ConfirmedTransaction,
}

#[derive(Deserialize)]
struct ValidatorStatistics {
    validators: Vec<Value>,
}

#[derive(Deserialize)]
struct BlockNonce {
    nonce: u64,
}

/// Client for the read side of the gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    transport: HttpTransport,
}

impl GatewayClient {
    /// Create a client for the configured gateway.
    pub fn new(config: &ApiConfig) -> GatewayResult<Self> {
        let transport = HttpTransport::new(config)?;
        tracing::info!(base_url = %transport.base_url(), "Gateway client initialized");
        Ok(Self { transport })
    }

    /// Create a client over an existing transport.
    pub fn with_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// Get balance and nonce of an account.
    pub async fn get_account_details(&self, address: &str) -> GatewayResult<AccountDetails> {
        self.transport
            .get("accounts", &["accounts", address], &Vec::new())
            .await
    }

    /// Fetch the validator list, propagating any failure.
    pub async fn fetch_validators(&self) -> GatewayResult<Vec<Value>> {
        let body: ValidatorStatistics = self
            .transport
            .get("validator_statistics", &["validator", "statistics"], &Vec::new())
            .await?;
        Ok(body.validators)
    }

    /// Get the validator list, or an empty list if it cannot be fetched.
    ///
    /// Validator data is informational for callers of this method, so any
    /// transport or shape failure is logged and reported as "no validators".
    /// Use [`GatewayClient::fetch_validators`] to observe the error.
    pub async fn get_validators(&self) -> Vec<Value> {
        match self.fetch_validators().await {
            Ok(validators) => validators,
            Err(e) => {
                tracing::warn!(error = %e, "Validator statistics unavailable, returning empty list");
                Vec::new()
            }
        }
    }

    /// Get current chain parameters.
    pub async fn get_network_config(&self) -> GatewayResult<NetworkConfig> {
        let body: Envelope<NetworkConfigData> = self
            .transport
            .get("network_config", &["network", "config"], &Vec::new())
            .await?;
        Ok(body.data.config)
    }

    /// Get the current metachain block height.
    pub async fn get_blockchain_block_height(&self) -> GatewayResult<u64> {
        let query: Query = vec![("shard", METACHAIN_SHARD.to_string()), ("fields", "nonce".to_string())];
        let blocks: Vec<BlockNonce> = self.transport.get("blocks", &["blocks"], &query).await?;
        blocks
            .first()
            .map(|block| block.nonce)
            .ok_or_else(|| GatewayError::Shape("empty block list".to_string()))
    }

    /// Get the block that confirmed a transaction.
    ///
    /// `hyperblockNonce` is reported as the block height.
    pub async fn get_confirmed_transaction(&self, tx_hash: &str) -> GatewayResult<ConfirmedTransaction> {
        let body: Envelope<TransactionData> = self
            .transport
            .get("transaction", &["transaction", tx_hash], &Vec::new())
            .await?;
        Ok(body.data.transaction)
    }

    /// Count transactions sent or received by `address` after `after`.
    pub async fn get_transactions_count(&self, address: &str, after: u64) -> GatewayResult<usize> {
        self.transport
            .get("transactions_count", &["transactions", "count"], &history_query(address, after))
            .await
    }

    /// Fetch one page of transactions sent or received by `address` after `after`.
    pub async fn get_transactions_page(
        &self,
        address: &str,
        after: u64,
        from: usize,
        size: usize,
    ) -> GatewayResult<Vec<RawTransaction>> {
        let mut query = history_query(address, after);
        query.push(("from", from.to_string()));
        query.push(("size", size.to_string()));
        self.transport.get("transactions", &["transactions"], &query).await
    }
}

/// Disjunctive sender-or-receiver filter shared by count and list queries.
fn history_query(address: &str, after: u64) -> Query {
    vec![
        ("condition", "should".to_string()),
        ("sender", address.to_string()),
        ("receiver", address.to_string()),
        ("after", after.to_string()),
    ]
}
