//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! forward handler produces:
//!     → logging.rs (structured log events with request IDs)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
