//! HTTP surface of the payoff server.
//!
//! `/analyze` lives in [`analysis`]; the `/health` and `/ready` probes in
//! [`health`]. Every route shares one middleware stack: request tracing, a
//! permissive CORS policy for the browser charting client, and the
//! configured body limit.

pub mod analysis;
pub mod health;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Resolved server settings
    pub config: Arc<ServerConfig>,
    /// When the router was built; `/health` reports uptime from it
    pub started_at: Instant,
}

impl AppState {
    /// State for a router built now.
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self {
            config,
            started_at: Instant::now(),
        }
    }
}

/// Assemble all routes behind the shared middleware stack.
pub fn build_router(config: Arc<ServerConfig>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(DefaultBodyLimit::max(config.max_body_bytes));

    Router::new()
        .merge(health::routes())
        .merge(analysis::routes())
        .layer(middleware)
        .with_state(AppState::new(config))
}
