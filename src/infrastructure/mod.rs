//! Infrastructure layer.
//!
//! Configuration loading, service wiring and the server lifecycle. No
//! business logic lives here.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`runtime`] - HTTP server lifecycle and graceful shutdown

pub mod bootstrap;
pub mod config;
pub mod runtime;
