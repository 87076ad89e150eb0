//! Outbound header construction.
//!
//! # Steps
//! 1. Copy every inbound header (repeated names keep all values)
//! 2. Drop proxy artifacts: `host`, `x-forwarded-for`, `x-forwarded-proto`
//! 3. Drop framing headers; the outbound client recomputes them from the body
//! 4. Overwrite the browser-identity set with fixed values
//!
//! Everything else, cookies and authorization included, is forwarded as is.

use axum::http::{HeaderMap, HeaderValue};

/// Proxy/transport artifacts that never reach the target.
pub const STRIPPED_HEADERS: [&str; 3] = ["host", "x-forwarded-for", "x-forwarded-proto"];

/// Framing headers tied to the inbound message.
pub const FRAMING_HEADERS: [&str; 2] = ["content-length", "transfer-encoding"];

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";
pub const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// Headers overwritten on every outbound request to look like a desktop browser.
pub const BROWSER_IDENTITY_HEADERS: [(&str, &str); 7] = [
    ("user-agent", USER_AGENT),
    ("accept", ACCEPT),
    ("accept-language", ACCEPT_LANGUAGE),
    ("accept-encoding", ACCEPT_ENCODING),
    ("dnt", "1"),
    ("connection", "keep-alive"),
    ("upgrade-insecure-requests", "1"),
];

/// Build the header map sent to the target.
pub fn build_outbound_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();

    for name in STRIPPED_HEADERS.iter().chain(FRAMING_HEADERS.iter()) {
        headers.remove(*name);
    }

    // insert() replaces every existing value for the name.
    for (name, value) in BROWSER_IDENTITY_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    headers
}
