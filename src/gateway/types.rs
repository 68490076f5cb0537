//! Gateway data model and error definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// Re-export the config sections the gateway is built from
pub use crate::config::schema::{ApiConfig, HistoryConfig};

/// Shard id of the metachain, used for chain height queries.
pub const METACHAIN_SHARD: u32 = 4_294_967_295;

/// Default page size for transaction list queries.
pub const TRANSACTIONS_SIZE: usize = 10_000;

/// Errors that can occur while talking to the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request could not be sent or completed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway answered with a non-2xx status.
    #[error("gateway returned status {status_code}: {message}")]
    Status {
        /// HTTP status code.
        status_code: u16,
        /// Response body, if any.
        message: String,
    },

    /// Response body did not decode into the expected structure.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response decoded but a required field is missing.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// Base URL could not be parsed.
    #[error("invalid gateway URL: {0}")]
    InvalidUrl(String),

    /// Operation is missing data needed to build a transaction.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// History enrichment did not finish within the configured budget.
    #[error("history enrichment timed out after {0} ms")]
    Timeout(u64),
}

impl GatewayError {
    /// True for failures of the request itself (network or status).
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Http(_) | GatewayError::Status { .. })
    }

    /// True when the gateway answered but with a body we cannot use.
    pub fn is_shape(&self) -> bool {
        matches!(self, GatewayError::Decode(_) | GatewayError::Shape(_))
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Chain parameters needed to price and sign a transaction.
///
/// Always fetched fresh; never cached between submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(rename = "erd_chain_id")]
    pub chain_id: String,
    #[serde(rename = "erd_denomination")]
    pub denomination: u32,
    #[serde(rename = "erd_min_gas_limit")]
    pub gas_limit: u64,
    #[serde(rename = "erd_min_gas_price")]
    pub gas_price: u64,
    #[serde(rename = "erd_gas_per_data_byte")]
    pub gas_per_byte: u64,
}

/// A transfer to be submitted.
///
/// Only the first sender and the first recipient are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOperation {
    pub senders: Vec<String>,
    pub recipients: Vec<String>,
    /// Amount in the smallest denomination, as a decimal string.
    pub value: String,
    /// Account nonce the transaction is signed with.
    pub transaction_sequence_number: u64,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub hash: String,
}

/// Block that confirmed a transaction.
///
/// Both fields are absent while the transaction is still pending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedTransaction {
    #[serde(rename(deserialize = "hyperblockNonce", serialize = "blockHeight"), default)]
    pub block_height: Option<u64>,
    #[serde(rename = "blockHash", default)]
    pub block_hash: Option<String>,
}

/// Balance and nonce of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    pub balance: String,
    pub nonce: u64,
}

/// A transaction from the list endpoint, enriched with its confirming block.
///
/// The raw record is kept as-is; `blockHeight` and `blockHash` are merged in
/// and replace any fields of the same name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub transaction: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
}

impl HistoryEntry {
    /// Merge confirmation fields into a raw transaction record.
    pub fn enrich(mut transaction: Map<String, Value>, confirmed: ConfirmedTransaction) -> Self {
        transaction.remove("blockHeight");
        transaction.remove("blockHash");
        Self {
            transaction,
            block_height: confirmed.block_height,
            block_hash: confirmed.block_hash,
        }
    }

    /// Hash of the underlying transaction, if the record carries one.
    pub fn tx_hash(&self) -> Option<&str> {
        self.transaction.get("txHash").and_then(Value::as_str)
    }
}

/// How the signature on a transaction was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Signature over the transaction hash.
    Hash,
    /// Signature over the raw serialized transaction.
    Raw,
}

impl TransactionType {
    pub fn from_sign_using_hash(sign_using_hash: bool) -> Self {
        if sign_using_hash {
            TransactionType::Hash
        } else {
            TransactionType::Raw
        }
    }

    pub fn version(self) -> u32 {
        match self {
            TransactionType::Hash => 2,
            TransactionType::Raw => 1,
        }
    }

    pub fn options(self) -> u32 {
        match self {
            TransactionType::Hash => 1,
            TransactionType::Raw => 0,
        }
    }

    /// Fields this type contributes to a submission body.
    pub fn payload(self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("version".to_string(), Value::from(self.version()));
        fields.insert("options".to_string(), Value::from(self.options()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_type_selection() {
        assert_eq!(TransactionType::from_sign_using_hash(true), TransactionType::Hash);
        assert_eq!(TransactionType::from_sign_using_hash(false), TransactionType::Raw);
    }

    #[test]
    fn test_transaction_type_payloads() {
        let hash = TransactionType::Hash.payload();
        assert_eq!(hash.get("version"), Some(&json!(2)));
        assert_eq!(hash.get("options"), Some(&json!(1)));

        let raw = TransactionType::Raw.payload();
        assert_eq!(raw.get("version"), Some(&json!(1)));
        assert_eq!(raw.get("options"), Some(&json!(0)));
    }

    #[test]
    fn test_network_config_decodes_erd_fields() {
        let config: NetworkConfig = serde_json::from_value(json!({
            "erd_chain_id": "1",
            "erd_denomination": 18,
            "erd_min_gas_limit": 50000,
            "erd_min_gas_price": 1000000000u64,
            "erd_gas_per_data_byte": 1500,
            "erd_round_duration": 6000
        }))
        .unwrap();

        assert_eq!(config.chain_id, "1");
        assert_eq!(config.denomination, 18);
        assert_eq!(config.gas_limit, 50000);
        assert_eq!(config.gas_price, 1_000_000_000);
        assert_eq!(config.gas_per_byte, 1500);
    }

    #[test]
    fn test_confirmed_transaction_pending() {
        let confirmed: ConfirmedTransaction =
            serde_json::from_value(json!({ "status": "pending" })).unwrap();
        assert_eq!(confirmed, ConfirmedTransaction::default());
    }

    #[test]
    fn test_history_entry_enrich_overrides() {
        let raw = json!({
            "txHash": "abc",
            "value": "100",
            "blockHash": "stale"
        });
        let Value::Object(map) = raw else { unreachable!() };

        let entry = HistoryEntry::enrich(
            map,
            ConfirmedTransaction {
                block_height: Some(42),
                block_hash: Some("fresh".to_string()),
            },
        );

        assert_eq!(entry.tx_hash(), Some("abc"));
        let serialized = serde_json::to_value(&entry).unwrap();
        assert_eq!(serialized["blockHash"], "fresh");
        assert_eq!(serialized["blockHeight"], 42);
        assert_eq!(serialized["value"], "100");
    }

    #[test]
    fn test_error_classes() {
        let err = GatewayError::Status {
            status_code: 502,
            message: "bad gateway".to_string(),
        };
        assert!(err.is_transport());
        assert!(!err.is_shape());
        assert_eq!(err.to_string(), "gateway returned status 502: bad gateway");

        let err = GatewayError::Shape("missing data.config".to_string());
        assert!(err.is_shape());
        assert!(!err.is_transport());

        let err = GatewayError::Timeout(250);
        assert_eq!(err.to_string(), "history enrichment timed out after 250 ms");
    }
}
