//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, connection bounds)
//! - Check the base origin is a usable URL prefix
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("upstream.timeout_secs must be greater than 0")]
    ZeroTimeout,

    #[error("upstream.max_connections must be greater than 0")]
    ZeroMaxConnections,

    #[error("upstream.max_idle_connections ({idle}) exceeds upstream.max_connections ({max})")]
    IdleExceedsMax { idle: usize, max: usize },

    #[error("upstream.base_origin '{0}' is not an absolute http(s) URL")]
    InvalidBaseOrigin(String),

    #[error("upstream.base_origin '{0}' must end with '/'")]
    BaseOriginWithoutSlash(String),

    #[error("listener.host must not be empty")]
    EmptyHost,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let upstream = &config.upstream;

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if upstream.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    } else if upstream.max_idle_connections > upstream.max_connections {
        errors.push(ValidationError::IdleExceedsMax {
            idle: upstream.max_idle_connections,
            max: upstream.max_connections,
        });
    }

    match Url::parse(&upstream.base_origin) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            if !upstream.base_origin.ends_with('/') {
                errors.push(ValidationError::BaseOriginWithoutSlash(
                    upstream.base_origin.clone(),
                ));
            }
        }
        _ => errors.push(ValidationError::InvalidBaseOrigin(upstream.base_origin.clone())),
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
