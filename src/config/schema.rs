//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::gateway::types::TRANSACTIONS_SIZE;

/// Root configuration for the gateway client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Gateway endpoint and transport settings.
    pub api: ApiConfig,

    /// History pagination and enrichment settings.
    pub history: HistoryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Gateway endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST gateway (e.g., "https://api.elrond.com").
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elrond.com".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// History aggregation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of transactions requested per page.
    pub page_size: usize,

    /// Upper bound on confirmation lookups in flight (None = unbounded).
    pub max_concurrent_lookups: Option<usize>,

    /// Deadline for the whole enrichment fan-out in milliseconds (None = wait forever).
    pub enrichment_timeout_ms: Option<u64>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            page_size: TRANSACTIONS_SIZE,
            max_concurrent_lookups: None,
            enrichment_timeout_ms: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
