//! Transaction history reconstruction.
//!
//! # Data Flow
//! ```text
//! /transactions/count          → total matching transactions
//!     → /transactions pages    → raw records, server order
//!     → /transaction/{hash}    → confirming block, one lookup per record (concurrent)
//!     → Vec<HistoryEntry>      → page order, block height/hash merged in
//! ```
//!
//! A failed count, page, or lookup fails the whole call; no partial
//! history is ever returned.

use std::time::Duration;

use futures_util::future::try_join_all;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use serde_json::Value;
use tokio::time::timeout;

use crate::gateway::client::{GatewayClient, RawTransaction};
use crate::gateway::types::{GatewayError, GatewayResult, HistoryConfig, HistoryEntry};
use crate::observability::metrics;

/// Builds enriched transaction histories for an address.
#[derive(Debug, Clone)]
pub struct HistoryAggregator {
    client: GatewayClient,
    config: HistoryConfig,
}

impl HistoryAggregator {
    /// Create a new aggregator.
    ///
    /// A zero page size or concurrency limit is raised to 1.
    pub fn new(client: GatewayClient, mut config: HistoryConfig) -> Self {
        if config.page_size == 0 {
            tracing::warn!("History page size of 0 raised to 1");
            config.page_size = 1;
        }
        if config.max_concurrent_lookups == Some(0) {
            tracing::warn!("History lookup limit of 0 raised to 1");
            config.max_concurrent_lookups = Some(1);
        }
        Self { client, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Get every transaction sent or received by `address` after `start_at`,
    /// each annotated with the block that confirmed it.
    pub async fn get_history(&self, address: &str, start_at: u64) -> GatewayResult<Vec<HistoryEntry>> {
        let transactions = self.collect_transactions(address, start_at).await?;

        if transactions.is_empty() {
            tracing::debug!(address = %address, "Account has no transactions");
            metrics::record_history_size(0);
            return Ok(Vec::new());
        }

        let entries = match self.config.enrichment_timeout_ms {
            Some(ms) => timeout(Duration::from_millis(ms), self.enrich_all(transactions))
                .await
                .map_err(|_| GatewayError::Timeout(ms))??,
            None => self.enrich_all(transactions).await?,
        };

        tracing::info!(address = %address, entries = entries.len(), "History assembled");
        metrics::record_history_size(entries.len());
        Ok(entries)
    }

    /// Page through the transaction list and concatenate all pages.
    ///
    /// Pages are requested while `from <= count`, so a count that is an
    /// exact multiple of the page size (including 0) costs one trailing
    /// page that is expected to be empty. Paging stops once the offset
    /// would overflow.
    pub async fn collect_transactions(
        &self,
        address: &str,
        start_at: u64,
    ) -> GatewayResult<Vec<RawTransaction>> {
        let count = self.client.get_transactions_count(address, start_at).await?;
        let page_size = self.config.page_size;

        tracing::debug!(address = %address, count, page_size, "Fetching transaction pages");

        let mut transactions = Vec::new();
        let mut from = 0;
        while from <= count {
            let page = self
                .client
                .get_transactions_page(address, start_at, from, page_size)
                .await?;
            transactions.extend(page);
            from = match from.checked_add(page_size) {
                Some(next) => next,
                None => break,
            };
        }

        Ok(transactions)
    }

    async fn enrich_all(&self, transactions: Vec<RawTransaction>) -> GatewayResult<Vec<HistoryEntry>> {
        let lookups = transactions.into_iter().map(|tx| self.enrich(tx));

        match self.config.max_concurrent_lookups {
            Some(limit) => stream::iter(lookups).buffered(limit).try_collect().await,
            None => try_join_all(lookups).await,
        }
    }

    async fn enrich(&self, transaction: RawTransaction) -> GatewayResult<HistoryEntry> {
        let tx_hash = transaction
            .get("txHash")
            .and_then(Value::as_str)
            .ok_or_else(|| GatewayError::Shape("transaction record without txHash".to_string()))?
            .to_string();

        let confirmed = self.client.get_confirmed_transaction(&tx_hash).await?;
        Ok(HistoryEntry::enrich(transaction, confirmed))
    }
}
