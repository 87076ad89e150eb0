//! Request-path error taxonomy.
//!
//! Every failure while forwarding a request ends up as one of two variants:
//! - `Dispatch`: the outbound call itself failed (DNS, refused connection,
//!   timeout, TLS, malformed target URL, truncated upstream body) → 503
//! - `Internal`: anything else in the pipeline → 500
//!
//! The HTTP translation lives in `http::response`.

use std::error::Error as StdError;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors produced while forwarding a single request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProxyError {
    /// Network-level failure of the outbound request.
    #[error("Proxy request failed: {0}")]
    Dispatch(String),

    /// Any other failure inside the forwarding pipeline.
    #[error("Proxy error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Status code returned to the caller for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Dispatch(_) => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build a dispatch failure from any error, keeping its source chain.
    pub fn dispatch(err: &(dyn StdError + 'static)) -> Self {
        ProxyError::Dispatch(describe(err))
    }

    /// Build an internal failure from any error, keeping its source chain.
    pub fn internal(err: &(dyn StdError + 'static)) -> Self {
        ProxyError::Internal(describe(err))
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::dispatch(&err)
    }
}

/// Result type for the forwarding pipeline.
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Render an error and all of its sources as `outer: inner: root`.
///
/// reqwest's top-level message is only "error sending request for url (..)";
/// the useful part (connection refused, timed out, dns error) sits in the
/// source chain.
pub fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
