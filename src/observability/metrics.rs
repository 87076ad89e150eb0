//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): forwarded requests by method, status, target rule
//! - `proxy_request_duration_seconds` (histogram): end-to-end latency by method, target rule
//!
//! The `metrics` macros are no-ops until a recorder is installed, so
//! recording is unconditional and the exporter is opt-in.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "proxy_requests_total";
pub const REQUEST_DURATION: &str = "proxy_request_duration_seconds";

/// Install the Prometheus recorder and its HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one forwarded request.
pub fn record_request(method: &str, status: u16, target: &'static str, start: Instant) {
    metrics::counter!(
        REQUESTS_TOTAL,
        "method" => method.to_string(),
        "status" => status.to_string(),
        "target" => target
    )
    .increment(1);

    metrics::histogram!(
        REQUEST_DURATION,
        "method" => method.to_string(),
        "target" => target
    )
    .record(start.elapsed().as_secs_f64());
}
