//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route to status page or forwarding handler)
//!     → request.rs (method, path, query, headers, body for POST/PUT/PATCH)
//!     → routing::target (resolve target URL)
//!     → headers.rs (strip proxy headers, set browser identity)
//!     → upstream::Transport (dispatch)
//!     → response.rs (relay upstream response or map error to 503/500)
//!     → Send to client
//! ```

pub mod headers;
pub mod request;
pub mod response;
pub mod server;
pub mod status;

pub use server::{AppState, HttpServer};
