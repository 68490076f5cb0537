//! Metrics collection.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): gateway calls by method, endpoint, status
//! - `gateway_request_duration_seconds` (histogram): gateway call latency
//! - `gateway_history_entries` (histogram): entries returned per history call
//!
//! Status `0` marks calls that failed before any response arrived.
//! Recording goes through the `metrics` facade; installing a recorder or
//! exporter is left to the embedding application.

use std::time::Instant;

/// Record one completed gateway request.
pub fn record_request(method: &'static str, endpoint: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "method" => method,
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "gateway_request_duration_seconds",
        "method" => method,
        "endpoint" => endpoint
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the size of an assembled history.
pub fn record_history_size(entries: usize) {
    metrics::histogram!("gateway_history_entries").record(entries as f64);
}
