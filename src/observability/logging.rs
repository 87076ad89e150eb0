//! Structured logging.
//!
//! Pretty output for development, one JSON object per line in production.
//! `RUST_LOG` overrides the configured level when set.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Default filter for a configured level: our crate and tower_http at that level.
pub fn default_filter(level: &str) -> String {
    format!("forward_proxy={level},tower_http={level}")
}

/// Install the global tracing subscriber.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.log_level).into());

    let subscriber = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => subscriber.with(fmt::layer().json()).init(),
        LogFormat::Pretty => subscriber.with(fmt::layer()).init(),
    }
}
