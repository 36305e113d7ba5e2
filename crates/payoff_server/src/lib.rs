//! REST API server for four-leg option strategy analysis
//!
//! Exposes the payoff engine of `payoff_core` over HTTP: `POST /analyze`
//! accepts four option legs and returns the sampled payoff curve with its
//! risk metrics. Health and readiness probes are served alongside.

pub mod config;
pub mod routes;
pub mod server;

// Re-export the engine for integration
pub use payoff_core;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
