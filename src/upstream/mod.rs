//! Outbound dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! OutboundRequest (method, url, headers, body)
//!     → Transport::dispatch
//!     → client.rs (shared reqwest client, connection slots)
//!     → OutboundResponse | ProxyError::Dispatch
//! ```
//!
//! # Design Decisions
//! - One transport per process, created at startup and shared via Arc
//! - The handler only sees the `Transport` trait so tests can swap it out
//! - Bodies are fully buffered in both directions

pub mod client;

use async_trait::async_trait;
use axum::http::{HeaderMap, Method, StatusCode};
use bytes::Bytes;

use crate::error::ProxyResult;

pub use client::UpstreamClient;

/// Request sent to the resolved target.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// Present only for POST, PUT and PATCH.
    pub body: Option<Bytes>,
}

/// Response received from the target, body fully read.
#[derive(Debug, Clone)]
pub struct OutboundResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Executes outbound requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and read the whole response.
    ///
    /// Network-level failures come back as `ProxyError::Dispatch`.
    async fn dispatch(&self, request: OutboundRequest) -> ProxyResult<OutboundResponse>;

    /// Release the transport's resources. Called once at shutdown.
    fn close(&self) {}
}
