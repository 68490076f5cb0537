//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! transport, client, history:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and histograms via the metrics facade)
//! ```

pub mod logging;
pub mod metrics;
