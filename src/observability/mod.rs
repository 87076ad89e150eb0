//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarding handler produces:
//!     → logging.rs (structured log events, request correlation ID)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```

pub mod logging;
pub mod metrics;
