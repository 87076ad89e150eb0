//! Target URL resolution.
//!
//! # Rules (first match wins)
//! 1. `url` query parameter present and non-empty → used verbatim, no other
//!    query parameters are forwarded
//! 2. Path starts with `http` → path used verbatim
//! 3. Otherwise → base origin + path
//!
//! Rules 2 and 3 forward the inbound query string untouched, so order and
//! repeated keys survive. Nothing is validated here; a malformed target only
//! shows up when the outbound client tries to send it.

use std::fmt;

/// Name of the query parameter that overrides path-based resolution.
pub const URL_PARAM: &str = "url";

/// Which resolution rule produced the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSource {
    /// Taken from the `url` query parameter.
    QueryParameter,
    /// The request path was already an absolute URL.
    AbsolutePath,
    /// The path was appended to the configured base origin.
    BaseOrigin,
}

impl TargetSource {
    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetSource::QueryParameter => "query",
            TargetSource::AbsolutePath => "absolute",
            TargetSource::BaseOrigin => "base",
        }
    }
}

impl fmt::Display for TargetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The destination of one forwarded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Absolute target URL, without the forwarded query string.
    pub url: String,
    /// Inbound query string to attach to the target, if any.
    pub query: Option<String>,
    pub source: TargetSource,
}

impl ResolvedTarget {
    /// Full URL handed to the outbound client.
    pub fn outbound_url(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.url, query),
            None => self.url.clone(),
        }
    }
}

/// Parse a raw query string into ordered `(key, value)` pairs.
///
/// Repeated keys are kept in their original order.
pub fn query_pairs(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Value of the `url` override parameter. Last occurrence wins; empty counts as absent.
fn url_override(query: &str) -> Option<String> {
    query_pairs(query)
        .into_iter()
        .rev()
        .find(|(k, _)| k == URL_PARAM)
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
}

/// Resolve the target for a request.
///
/// `path` is the decoded request path without its leading `/`. `query` is
/// the raw inbound query string.
pub fn resolve_target(path: &str, query: Option<&str>, base_origin: &str) -> ResolvedTarget {
    if let Some(url) = query.and_then(url_override) {
        return ResolvedTarget {
            url,
            query: None,
            source: TargetSource::QueryParameter,
        };
    }

    let forwarded_query = query.filter(|q| !q.is_empty()).map(str::to_string);

    if path.starts_with("http") {
        ResolvedTarget {
            url: path.to_string(),
            query: forwarded_query,
            source: TargetSource::AbsolutePath,
        }
    } else {
        ResolvedTarget {
            url: format!("{}{}", base_origin, path),
            query: forwarded_query,
            source: TargetSource::BaseOrigin,
        }
    }
}
