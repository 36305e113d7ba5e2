//! Liveness and readiness probes.
//!
//! `GET /health` reports build and runtime facts about the analyzer;
//! `GET /ready` answers once the listener is accepting connections.

use axum::{extract::State, routing::get, Json, Router};
use payoff_core::analysis::LEG_COUNT;
use serde::{Deserialize, Serialize};

use super::AppState;

/// Coarse service state reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Serving requests normally
    Healthy,
}

/// Limits the analyzer enforces on `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerLimits {
    /// Number of legs every strategy must contain
    pub leg_count: usize,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: String,
    pub uptime_secs: u64,
    /// `development`, `staging` or `production`
    pub environment: String,
    pub analyzer: AnalyzerLimits,
}

/// Body of `GET /ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub ready: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: ServiceStatus::Healthy,
        version: crate::VERSION.to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        environment: state.config.environment.to_string(),
        analyzer: AnalyzerLimits {
            leg_count: LEG_COUNT,
            max_body_bytes: state.config.max_body_bytes,
        },
    })
}

// Analysis is pure computation with nothing to warm up.
async fn ready() -> Json<ReadyResponse> {
    Json(ReadyResponse { ready: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, ServerConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde::de::DeserializeOwned;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn fetch<T: DeserializeOwned>(config: ServerConfig, uri: &str) -> (StatusCode, T) {
        let router = routes().with_state(AppState::new(Arc::new(config)));
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_service_facts() {
        let (status, health): (_, HealthResponse) =
            fetch(ServerConfig::default(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(health.status, ServiceStatus::Healthy);
        assert_eq!(health.version, crate::VERSION);
        assert_eq!(health.environment, "development");
        assert_eq!(health.analyzer.leg_count, 4);
        assert_eq!(health.analyzer.max_body_bytes, 64 * 1024);
    }

    #[tokio::test]
    async fn test_health_reflects_configuration() {
        let mut config = ServerConfig::default();
        config.environment = Environment::Production;
        config.max_body_bytes = 4096;

        let (_, health): (_, HealthResponse) = fetch(config, "/health").await;

        assert_eq!(health.environment, "production");
        assert_eq!(health.analyzer.max_body_bytes, 4096);
    }

    #[tokio::test]
    async fn test_health_wire_format() {
        let (_, value): (_, serde_json::Value) = fetch(ServerConfig::default(), "/health").await;

        assert_eq!(value["status"], "healthy");
        assert!(value.get("uptimeSecs").is_some());
        assert_eq!(value["analyzer"]["legCount"], 4);
    }

    #[tokio::test]
    async fn test_ready_probe() {
        let (status, ready): (_, ReadyResponse) = fetch(ServerConfig::default(), "/ready").await;

        assert_eq!(status, StatusCode::OK);
        assert!(ready.ready);
    }
}
