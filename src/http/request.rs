//! Inbound request extraction and outbound request construction.
//!
//! # Responsibilities
//! - Capture method, path, raw query and headers of the inbound request
//! - Percent-decode the path lossily so non-UTF-8 escapes still forward
//! - Read the body only for methods that carry one (POST, PUT, PATCH)
//! - Combine target resolution and header construction into an `OutboundRequest`
//!
//! # Design Decisions
//! - The body is passed through byte-for-byte, never re-encoded
//! - Bodies on other methods are left unread and not forwarded

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request};
use bytes::Bytes;
use percent_encoding::percent_decode_str;

use crate::error::{ProxyError, ProxyResult};
use crate::http::headers::build_outbound_headers;
use crate::routing::{resolve_target, ResolvedTarget};
use crate::upstream::OutboundRequest;

/// Whether requests with this method have their body forwarded.
pub fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Decode a raw URI path and drop its leading `/`.
///
/// Invalid UTF-8 sequences become U+FFFD.
pub fn decoded_path(raw: &str) -> String {
    let trimmed = raw.strip_prefix('/').unwrap_or(raw);
    percent_decode_str(trimmed).decode_utf8_lossy().into_owned()
}

/// The parts of an inbound request the forwarding pipeline uses.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    /// Decoded path without its leading `/`.
    pub path: String,
    /// Raw query string, as received.
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl InboundRequest {
    /// Split an axum request, reading at most `max_body_bytes` of body.
    pub async fn from_request(request: Request<Body>, max_body_bytes: usize) -> ProxyResult<Self> {
        let (parts, body) = request.into_parts();

        let body = if carries_body(&parts.method) {
            let bytes = axum::body::to_bytes(body, max_body_bytes)
                .await
                .map_err(|e| ProxyError::internal(&e))?;
            Some(bytes)
        } else {
            None
        };

        Ok(Self {
            method: parts.method,
            path: decoded_path(parts.uri.path()),
            query: parts.uri.query().map(str::to_string),
            headers: parts.headers,
            body,
        })
    }

    /// Resolve this request's target against `base_origin`.
    pub fn target(&self, base_origin: &str) -> ResolvedTarget {
        resolve_target(&self.path, self.query.as_deref(), base_origin)
    }

    /// Build the request sent to `target`. Method and body are moved over unchanged.
    pub fn into_outbound(self, target: &ResolvedTarget) -> OutboundRequest {
        OutboundRequest {
            headers: build_outbound_headers(&self.headers),
            method: self.method,
            url: target.outbound_url(),
            body: self.body,
        }
    }
}
