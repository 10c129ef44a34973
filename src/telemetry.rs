//! # Tracing Setup
//!
//! Installs the global subscriber. `RUST_LOG` overrides
//! [`DEFAULT_LOG_FILTER`]. JSON output uses the Bunyan format so log
//! aggregators can parse it line by line.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

use crate::config::{Config, LogFormat};
use crate::utils::constant::{DEFAULT_LOG_FILTER, SERVICE_NAME};

pub fn init_subscriber(config: &Config) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match config.log_format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(
                SERVICE_NAME.to_string(),
                std::io::stdout,
            ))
            .try_init(),
    }
}
