//! Listener lifecycle.
//!
//! [`Server::run`] binds the configured address and serves until Ctrl-C or
//! SIGTERM, letting in-flight requests finish before returning.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::routes::build_router;

/// The payoff API bound to one configuration.
pub struct Server {
    config: Arc<ServerConfig>,
    app: Router,
}

impl Server {
    /// Build the router for `config`; nothing is bound until [`Server::run`].
    pub fn new(config: ServerConfig) -> Self {
        let config = Arc::new(config);
        let app = build_router(Arc::clone(&config));
        Self { config, app }
    }

    /// Settings the server was built with.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind `host:port` (host names are resolved) and serve until a
    /// shutdown signal arrives.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(addr = %listener.local_addr()?, "Listening");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Drained in-flight requests, server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;

    const IRON_CONDOR: &str = r#"[
        {"type": "call", "strike_price": 100, "bid": 10.05, "ask": 12.04, "long_short": "long", "expiration_date": "2099-12-17T00:00:00Z"},
        {"type": "call", "strike_price": 102.5, "bid": 12.10, "ask": 14, "long_short": "long", "expiration_date": "2099-12-17T00:00:00Z"},
        {"type": "put", "strike_price": 103, "bid": 14, "ask": 15.50, "long_short": "short", "expiration_date": "2099-12-17T00:00:00Z"},
        {"type": "put", "strike_price": 105, "bid": 16, "ask": 18, "long_short": "long", "expiration_date": "2099-12-17T00:00:00Z"}
    ]"#;

    /// Live server on an ephemeral port, stopped when `stop` is sent or dropped.
    struct Running {
        base: String,
        stop: oneshot::Sender<()>,
        task: JoinHandle<std::io::Result<()>>,
    }

    async fn start() -> Running {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();

        let task = tokio::spawn(Server::new(ServerConfig::default()).serve(listener, async move {
            let _ = stopped.await;
        }));

        Running {
            base: format!("http://{addr}"),
            stop,
            task,
        }
    }

    #[test]
    fn test_server_keeps_configuration() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..Default::default()
        };

        let server = Server::new(config);

        assert_eq!(server.config().socket_addr(), "127.0.0.1:3000");
    }

    #[tokio::test]
    async fn test_serves_health_over_tcp() {
        let server = start().await;

        let response = reqwest::get(format!("{}/health", server.base)).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_serves_analysis_over_tcp() {
        let server = start().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/analyze", server.base))
            .header("content-type", "application/json")
            .body(IRON_CONDOR)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["max_profit"], 97.96);
        assert_eq!(body["max_loss"], -89.0);
        assert_eq!(body["break_even_points"][0], 112.04);
        assert_eq!(body["xy_values"].as_array().map(Vec::len), Some(40));

        let response = client
            .post(format!("{}/analyze", server.base))
            .header("content-type", "application/json")
            .body("[]")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_shutdown_signal_stops_server() {
        let Running { base, stop, task } = start().await;
        assert!(reqwest::get(format!("{base}/ready")).await.is_ok());

        stop.send(()).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("server did not stop")
            .unwrap();

        assert!(result.is_ok());
    }
}
