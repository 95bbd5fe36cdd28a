use std::path::PathBuf;

use domain_types::types::GatewayConfig;

use crate::{error::ConfigurationError, logger};

/// Prefix for environment-variable overrides, e.g.
/// `ORDER_API__GATEWAY__MERCHANT_ID`.
pub const ENV_PREFIX: &str = "ORDER_API";

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Config {
    pub server: Server,
    #[serde(default)]
    pub log: logger::config::Log,
    pub gateway: GatewayConfig,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

/// Run environment of the process itself; selects which config file is
/// layered under the environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Env {
    Development,
    Production,
}

impl Env {
    pub fn current_env() -> Self {
        match std::env::var("RUN_ENV").as_deref() {
            Ok("production") | Ok("Production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn config_file(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Production => "production.toml",
        }
    }
}

impl Config {
    /// Builds the configuration from the default locations: the
    /// environment-selected TOML file overlaid with `ORDER_API__` variables.
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::new_with_config_path(None)
    }

    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        let env = Env::current_env();
        let config_path = explicit_config_path
            .unwrap_or_else(|| PathBuf::from("config").join(env.config_file()));

        let config = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?;

        #[allow(clippy::print_stderr)]
        serde_path_to_error::deserialize(config).map_err(|error| {
            eprintln!("Unable to deserialize application configuration: {error}");
            error.into_inner()
        })
    }
}

impl Server {
    pub async fn tcp_listener(&self) -> Result<tokio::net::TcpListener, ConfigurationError> {
        let loc = format!("{}:{}", self.host, self.port);

        tracing::info!(loc = %loc, "binding the server");

        Ok(tokio::net::TcpListener::bind(loc).await?)
    }
}
