//! # Shortlink Node Library
//!
//! Exposes the node's wiring for the binary and for tests.
//!
//! - `container`: builds adapters, filter, minter and service from config
//! - `telemetry`: tracing subscriber setup

pub mod container;
pub mod telemetry;

pub use container::ShortlinkNode;
pub use telemetry::{init_tracing, TelemetryError};
