//! Elrond REST gateway integration.
//!
//! # Data Flow
//! ```text
//! ApiConfig (base URL, timeout)
//!     → transport.rs (single HTTP request, JSON decode, metrics)
//!     → client.rs (network config, confirmations, account/validator/height lookups)
//!     → transaction.rs (fresh network config → body → /transaction/send)
//!     → history.rs (count → pages → concurrent confirmation lookups)
//! ```
//!
//! # Constraints
//! - No retries anywhere; a submission is posted exactly once
//! - Network configuration is never cached
//! - Errors propagate unchanged, except the documented validator fallback

pub mod client;
pub mod history;
pub mod transaction;
pub mod transport;
pub mod types;

pub use client::{GatewayClient, RawTransaction};
pub use history::HistoryAggregator;
pub use transaction::TxSubmitter;
pub use transport::HttpTransport;
pub use types::{
    AccountDetails, ConfirmedTransaction, GatewayError, GatewayResult, HistoryEntry,
    NetworkConfig, SubmissionResult, TransactionType, TransferOperation, METACHAIN_SHARD,
    TRANSACTIONS_SIZE,
};
