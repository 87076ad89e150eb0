//! Shared utilities for integration tests.

use axum::{
    body::Bytes,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{AppendHeaders, IntoResponse},
    routing::get,
    Json, Router,
};
use forward_proxy::{HttpServer, ProxyConfig, Shutdown};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Raw bytes served by `/binary`, deliberately not valid gzip.
#[allow(dead_code)]
pub const BINARY_BODY: &[u8] = &[0x1f, 0x8b, 0x08, 0x00, 0xff, 0x00, 0x42];

/// Start a backend on an ephemeral port.
///
/// Every path not listed below echoes the request back as JSON:
/// `{"method", "path", "query", "headers": [[name, value], ..], "body"}`.
/// - `/redirect` → 302 to `/landing`
/// - `/slow` → answers after 3 seconds
/// - `/cookies` → 201 with two `set-cookie` headers and `x-upstream: yes`
/// - `/binary` → `BINARY_BODY` labelled `content-encoding: gzip`
pub async fn start_backend() -> SocketAddr {
    let app = Router::new()
        .route("/redirect", get(redirect))
        .route("/slow", get(slow))
        .route("/cookies", get(cookies))
        .route("/binary", get(binary))
        .fallback(echo);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Start a raw backend that answers every request with a chunked
/// `hello world`, then closes the connection.
#[allow(dead_code)]
pub async fn start_chunked_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let response = "HTTP/1.1 200 OK\r\n\
                    content-type: text/plain\r\n\
                    transfer-encoding: chunked\r\n\
                    connection: close\r\n\r\n\
                    5\r\nhello\r\n6\r\n world\r\n0\r\n\r\n";
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    addr
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let headers: Vec<(String, String)> = headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                v.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();

    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/landing")])
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(3)).await;
    "late"
}

async fn cookies() -> impl IntoResponse {
    (
        StatusCode::CREATED,
        [("x-upstream", "yes")],
        AppendHeaders([(header::SET_COOKIE, "a=1"), (header::SET_COOKIE, "b=2")]),
        "cookie jar",
    )
}

async fn binary() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/octet-stream"),
            (header::CONTENT_ENCODING, "gzip"),
        ],
        BINARY_BODY,
    )
}

/// Proxy config whose base origin points at `backend`.
pub fn proxy_config(backend: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.upstream.base_origin = format!("http://{}/", backend);
    config.upstream.use_system_proxy = false;
    config
}

/// Start a proxy on an ephemeral port. Trigger the returned `Shutdown` to stop it.
pub async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Test client that ignores system proxy settings and does not follow redirects.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// All values of header `name` in an echo response.
#[allow(dead_code)]
pub fn echoed_header<'a>(echo: &'a Value, name: &str) -> Vec<&'a str> {
    echo["headers"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|pair| pair[0] == name)
        .map(|pair| pair[1].as_str().unwrap())
        .collect()
}
