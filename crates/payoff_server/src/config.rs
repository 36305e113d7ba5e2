//! Server configuration.
//!
//! A [`ServerConfig`] starts from defaults (or a TOML file) and is refined by
//! [`Overrides`] layers: first the `PAYOFF_*` environment variables, then the
//! command line. Each layer only touches the settings it actually carries.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable for the bind host
pub const ENV_HOST: &str = "PAYOFF_SERVER_HOST";
/// Environment variable for the bind port
pub const ENV_PORT: &str = "PAYOFF_SERVER_PORT";
/// Environment variable for the log level
pub const ENV_LOG_LEVEL: &str = "PAYOFF_LOG_LEVEL";
/// Environment variable for the deployment environment
pub const ENV_ENVIRONMENT: &str = "PAYOFF_ENV";
/// Environment variable for the request body limit
pub const ENV_MAX_BODY_BYTES: &str = "PAYOFF_MAX_BODY_BYTES";

/// Smallest accepted request body limit.
///
/// A four-leg request body is a few hundred bytes.
pub const MIN_BODY_BYTES: usize = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} {value:?}: expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("port must be between 1 and 65535")]
    ZeroPort,

    #[error("body limit of {0} bytes is below the minimum of {min} bytes", min = MIN_BODY_BYTES)]
    BodyLimitTooSmall(usize),

    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, expected: &'static str) -> Self {
        ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            expected,
        }
    }
}

/// Verbosity of the default tracing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ]
        .into_iter()
        .find(|level| level.as_filter_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| ConfigError::invalid("log level", s, "trace, debug, info, warn or error"))
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, ConfigError> {
        value.parse()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Deployment environment.
///
/// Anything other than development logs JSON lines for collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Whether logs should be emitted as JSON lines
    pub fn json_logs(self) -> bool {
        self != Environment::Development
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::invalid(
                "environment",
                s,
                "development, staging or production",
            )),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, ConfigError> {
        value.parse()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: LogLevel,
    /// Largest accepted `POST /analyze` body; larger requests get 413
    pub max_body_bytes: usize,
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::Info,
            max_body_bytes: 64 * 1024,
            environment: Environment::Development,
        }
    }
}

impl ServerConfig {
    /// Read settings from a TOML file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overwrite every setting the layer carries.
    pub fn apply(&mut self, overrides: Overrides) {
        let Overrides {
            host,
            port,
            log_level,
            environment,
            max_body_bytes,
        } = overrides;

        if let Some(host) = host {
            self.host = host;
        }
        self.port = port.unwrap_or(self.port);
        self.log_level = log_level.unwrap_or(self.log_level);
        self.environment = environment.unwrap_or(self.environment);
        self.max_body_bytes = max_body_bytes.unwrap_or(self.max_body_bytes);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if self.max_body_bytes < MIN_BODY_BYTES {
            return Err(ConfigError::BodyLimitTooSmall(self.max_body_bytes));
        }
        Ok(())
    }

    /// `host:port`, resolved by the listener at bind time
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A partial set of settings from one configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<LogLevel>,
    pub environment: Option<Environment>,
    pub max_body_bytes: Option<usize>,
}

impl Overrides {
    /// Read the `PAYOFF_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the `PAYOFF_*` variables through `lookup`.
    ///
    /// Unset variables are skipped; a set variable that fails to parse is an
    /// error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup(ENV_PORT)
            .map(|raw| {
                raw.parse()
                    .map_err(|_| ConfigError::invalid("port", &raw, "an integer in 1..=65535"))
            })
            .transpose()?;
        let max_body_bytes = lookup(ENV_MAX_BODY_BYTES)
            .map(|raw| {
                raw.parse()
                    .map_err(|_| ConfigError::invalid("body limit", &raw, "a byte count"))
            })
            .transpose()?;

        Ok(Self {
            host: lookup(ENV_HOST),
            port,
            log_level: lookup(ENV_LOG_LEVEL).map(|raw| raw.parse()).transpose()?,
            environment: lookup(ENV_ENVIRONMENT).map(|raw| raw.parse()).transpose()?,
            max_body_bytes,
        })
    }
}

/// Resolve the final configuration.
///
/// Priority, highest first: `cli`, environment variables, the config file,
/// built-in defaults.
pub fn build_config(file: Option<&Path>, cli: Overrides) -> Result<ServerConfig, ConfigError> {
    let mut config = match file {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    config.apply(Overrides::from_env()?);
    config.apply(cli);
    config.validate()?;

    Ok(config)
}
