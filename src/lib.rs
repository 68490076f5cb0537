//! Client adapter for the Elrond public REST gateway.
//!
//! Reads account and chain state, submits signed transfers, and rebuilds
//! an address's transaction history with the confirming block of every
//! transaction.

pub mod config;
pub mod gateway;
pub mod observability;

pub use config::GatewayConfig;
pub use gateway::{GatewayClient, GatewayError, HistoryAggregator, TxSubmitter};
