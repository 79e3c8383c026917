//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! contract / store / retirement
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and gauges, optional Prometheus endpoint)
//! ```

pub mod logging;
pub mod metrics;
