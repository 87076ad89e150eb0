//! reqwest-backed transport with a bounded number of in-flight connections.
//!
//! reqwest caps idle connections per host but has no global limit on open
//! ones, so a semaphore sized to `max_connections` gates each dispatch.
//! Callers over the limit wait for a slot instead of being rejected.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect, Client};
use tokio::sync::Semaphore;

use crate::config::UpstreamConfig;
use crate::error::{ProxyError, ProxyResult};
use crate::upstream::{OutboundRequest, OutboundResponse, Transport};

/// Shared outbound HTTP client.
pub struct UpstreamClient {
    client: Client,
    connection_slots: Arc<Semaphore>,
    max_connections: usize,
}

impl UpstreamClient {
    /// Build the client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let redirect_policy = if config.follow_redirects {
            redirect::Policy::limited(config.max_redirects)
        } else {
            redirect::Policy::none()
        };

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(redirect_policy)
            .pool_max_idle_per_host(config.max_idle_connections);

        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build()?;

        tracing::debug!(
            timeout_secs = config.timeout_secs,
            max_connections = config.max_connections,
            max_idle_connections = config.max_idle_connections,
            follow_redirects = config.follow_redirects,
            "Upstream client built"
        );

        Ok(Self {
            client,
            connection_slots: Arc::new(Semaphore::new(config.max_connections)),
            max_connections: config.max_connections,
        })
    }
}

#[async_trait]
impl Transport for UpstreamClient {
    async fn dispatch(&self, request: OutboundRequest) -> ProxyResult<OutboundResponse> {
        // Held until the body has been read.
        let _slot = self
            .connection_slots
            .acquire()
            .await
            .map_err(|_| ProxyError::Dispatch("upstream client is shut down".to_string()))?;

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(OutboundResponse {
            status,
            headers,
            body,
        })
    }

    fn close(&self) {
        if self.connection_slots.is_closed() {
            return;
        }
        self.connection_slots.close();
        tracing::info!(
            in_flight = self.max_connections - self.connection_slots.available_permits(),
            "Upstream client closed"
        );
    }
}
