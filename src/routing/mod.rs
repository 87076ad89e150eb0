//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, raw query)
//!     → target.rs (apply resolution rules)
//!     → Return: ResolvedTarget (absolute URL + forwarded query)
//! ```
//!
//! # Design Decisions
//! - Pure function of path, query and base origin; no per-request state
//! - No URL validation: malformed targets fail at dispatch time
//! - Deterministic: same input always resolves to the same target

pub mod target;

pub use target::{resolve_target, ResolvedTarget, TargetSource};
