//! Response translation.
//!
//! # Responsibilities
//! - Relay the upstream response: status, headers (repeats kept) and raw body
//! - Drop hop-by-hop headers; the body is already de-chunked and fully buffered
//! - Map pipeline failures to JSON error responses (503 dispatch, 500 internal)
//!
//! # Design Decisions
//! - No decompression or content rewriting; `content-encoding` stays accurate
//! - Error bodies are `{"detail": "..."}`

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::ProxyError;
use crate::upstream::OutboundResponse;

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Connection-scoped headers of the upstream hop. `content-length` is kept,
/// it still matches the buffered body.
pub const HOP_BY_HOP_HEADERS: [&str; 7] = [
    "transfer-encoding",
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "upgrade",
];

/// Turn the upstream response into the response sent to the caller.
pub fn relay(upstream: OutboundResponse) -> Response {
    let mut headers = upstream.headers;
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }

    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = headers;
    response
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status: StatusCode = self.status_code();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
