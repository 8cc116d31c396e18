//! Lumengate daemon internals.
//!
//! The binary lives in `main.rs`; this library exposes the
//! configuration surface and the session loop so the integration tests
//! can drive them directly.

pub mod config;
pub mod session;
