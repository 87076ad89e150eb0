//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build upstream client → Bind listener
//!
//! Shutdown:
//!     signals.rs: SIGTERM/SIGINT → Shutdown::trigger
//!     shutdown.rs: broadcast → server stops accepting, drains
//!     server.rs: upstream transport closed exactly once
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
