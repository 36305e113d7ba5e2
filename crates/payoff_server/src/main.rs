//! Payoff Server
//!
//! REST API for four-leg option strategy payoff analysis.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use payoff_server::config::{build_config, Environment, LogLevel, Overrides, ServerConfig};
use payoff_server::server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Serve option strategy payoff analysis over HTTP.
///
/// Flags override `PAYOFF_*` environment variables, which override the
/// config file.
#[derive(Parser, Debug)]
#[command(name = "payoff_server", version, about)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// development, staging or production
    #[arg(long)]
    environment: Option<Environment>,

    /// Largest accepted request body in bytes
    #[arg(long, value_name = "BYTES")]
    max_body_bytes: Option<usize>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            log_level: self.log_level,
            environment: self.environment,
            max_body_bytes: self.max_body_bytes,
        }
    }
}

fn init_tracing(config: &ServerConfig) {
    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    let registry = tracing_subscriber::registry().with(filter);

    if config.environment.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = build_config(args.config.as_deref(), args.overrides())
        .context("Failed to load server configuration")?;

    init_tracing(&config);

    tracing::info!(
        version = payoff_server::VERSION,
        address = %config.socket_addr(),
        log_level = %config.log_level,
        environment = %config.environment,
        max_body_bytes = config.max_body_bytes,
        "Starting payoff server"
    );

    Server::new(config)
        .run()
        .await
        .context("Server terminated with an I/O error")
}
