use tracing_subscriber::EnvFilter;

use super::config::{Log, LogFormat};

/// Installs the global tracing subscriber according to the log config.
/// `RUST_LOG` takes precedence over the configured directive when set.
pub fn setup(config: &Log, service: &str) {
    if !config.console.enabled {
        return;
    }

    let level = config.console.level.into_level();
    let directive = config
        .console
        .filtering_directive
        .clone()
        .unwrap_or_else(|| format!("{level},{service}={level},tower_http={level}"));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    match config.console.log_format {
        LogFormat::Default => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}
