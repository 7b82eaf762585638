//! Tracing subscriber setup for the binary

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr `fmt` subscriber
///
/// `RUST_LOG` wins over `logging.filter` when it is set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_env_filter(config)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| Error::Logging(format!("failed to initialize tracing subscriber: {}", e)))?;

    tracing::debug!(target: "logging", filter = %config.filter, "logging_initialized");
    Ok(())
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if config.filter.trim().is_empty() {
        return Err(Error::Logging("logging.filter cannot be empty".into()));
    }
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .map_err(|e| Error::Logging(format!("failed to parse RUST_LOG '{}': {}", directives, e))),
        _ => EnvFilter::try_new(&config.filter).map_err(|e| {
            Error::Logging(format!(
                "failed to parse logging.filter '{}': {}",
                config.filter, e
            ))
        }),
    }
}
