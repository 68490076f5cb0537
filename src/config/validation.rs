//! Configuration validation.
//!
//! Semantic checks that serde cannot express: the base URL parses and uses
//! an HTTP scheme, sizes and timeouts are non-zero. All errors are collected,
//! not just the first.

use std::fmt;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn error(field: &'static str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field,
        message: message.into(),
    }
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.api.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(error(
            "api.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(error("api.base_url", e.to_string())),
    }

    if config.api.request_timeout_secs == 0 {
        errors.push(error("api.request_timeout_secs", "must be greater than 0"));
    }

    if config.history.page_size == 0 {
        errors.push(error("history.page_size", "must be greater than 0"));
    }

    if config.history.max_concurrent_lookups == Some(0) {
        errors.push(error("history.max_concurrent_lookups", "must be greater than 0 when set"));
    }

    if config.history.enrichment_timeout_ms == Some(0) {
        errors.push(error("history.enrichment_timeout_ms", "must be greater than 0 when set"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
