//! HTTP server setup and the forwarding handler.
//!
//! # Responsibilities
//! - Create the Axum Router (status page + catch-all forwarding routes)
//! - Wire up middleware (tracing)
//! - Run the forwarding pipeline: extract → resolve → build headers → dispatch → relay
//! - Serve until shutdown, then close the upstream transport once

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::{get, on, MethodFilter},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::ProxyConfig;
use crate::http::request::InboundRequest;
use crate::http::response::relay;
use crate::http::status::get_status;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::upstream::{Transport, UpstreamClient};

/// Methods accepted by the forwarding routes.
pub fn forwarded_methods() -> MethodFilter {
    MethodFilter::GET
        .or(MethodFilter::POST)
        .or(MethodFilter::PUT)
        .or(MethodFilter::DELETE)
        .or(MethodFilter::PATCH)
        .or(MethodFilter::HEAD)
        .or(MethodFilter::OPTIONS)
}

/// Forwarded methods on `/`, where GET serves the status page instead.
fn root_forwarded_methods() -> MethodFilter {
    MethodFilter::POST
        .or(MethodFilter::PUT)
        .or(MethodFilter::DELETE)
        .or(MethodFilter::PATCH)
        .or(MethodFilter::HEAD)
        .or(MethodFilter::OPTIONS)
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn Transport>,
    pub base_origin: Arc<str>,
    pub max_body_bytes: usize,
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a server backed by a fresh upstream client.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let transport = Arc::new(UpstreamClient::new(&config.upstream)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a server that dispatches through `transport`.
    pub fn with_transport(config: ProxyConfig, transport: Arc<dyn Transport>) -> Self {
        let state = AppState {
            transport,
            base_origin: Arc::from(config.upstream.base_origin.as_str()),
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(get_status).on(root_forwarded_methods(), forward))
            .route("/{*path}", on(forwarded_methods(), forward))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// A clone of the router, for serving or driving with `oneshot`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown_rx` fires, then close the upstream transport.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_origin = %self.state.base_origin,
            "HTTP server starting"
        );

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await;

        self.state.transport.close();
        tracing::info!("HTTP server stopped");
        result
    }
}

/// Forward one request to its resolved target.
///
/// The path is taken from the raw URI, not a `Path` extractor, so paths that
/// decode to invalid UTF-8 are still forwarded.
async fn forward(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let method_str = method.to_string();

    let inbound = match InboundRequest::from_request(request, state.max_body_bytes).await {
        Ok(inbound) => inbound,
        Err(e) => {
            tracing::warn!(request_id = %request_id, method = %method, error = %e, "Failed to read request");
            metrics::record_request(&method_str, e.status_code().as_u16(), "none", start_time);
            return e.into_response();
        }
    };

    let target = inbound.target(&state.base_origin);
    let target_url = target.outbound_url();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        target = %target_url,
        source = %target.source,
        "Proxying request"
    );

    let outbound = inbound.into_outbound(&target);

    match state.transport.dispatch(outbound).await {
        Ok(upstream) => {
            let status = upstream.status;
            tracing::info!(
                request_id = %request_id,
                method = %method,
                target = %target_url,
                status = status.as_u16(),
                bytes = upstream.body.len(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Request forwarded"
            );
            metrics::record_request(&method_str, status.as_u16(), target.source.as_str(), start_time);
            relay(upstream)
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                target = %target_url,
                error = %e,
                "Upstream error"
            );
            metrics::record_request(
                &method_str,
                e.status_code().as_u16(),
                target.source.as_str(),
                start_time,
            );
            e.into_response()
        }
    }
}
