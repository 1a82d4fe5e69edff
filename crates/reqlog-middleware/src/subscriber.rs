//! Process-wide `tracing` subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

use reqlog_core::config::request_log::RequestLogConfig;
use reqlog_core::{AppError, AppResult};

use crate::format::JsonLines;

/// Builds the env filter: `RUST_LOG` when set, the configured level
/// otherwise. Fails on an unrecognized configured level even when
/// `RUST_LOG` overrides it.
pub fn build_filter(config: &RequestLogConfig) -> AppResult<EnvFilter> {
    let severity = config.severity()?;
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(severity.as_str())))
}

/// Installs the global subscriber writing to stderr: [`JsonLines`] in
/// production, pretty output in development mode.
pub fn init_subscriber(config: &RequestLogConfig) -> AppResult<()> {
    let filter = build_filter(config)?;

    let installed = if config.development {
        fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        fmt()
            .event_format(JsonLines)
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    };

    installed.map_err(|e| AppError::configuration(format!("Failed to install subscriber: {e}")))
}
