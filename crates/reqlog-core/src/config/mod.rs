//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from an
//! optional TOML file overlaid with `REQLOG__*` environment variables.

pub mod app;
pub mod request_log;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::request_log::RequestLogConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Request logging settings.
    #[serde(default)]
    pub request_log: RequestLogConfig,
}

impl AppConfig {
    /// Load configuration from `path` (extension optional, file optional)
    /// and environment variables prefixed with `REQLOG__`.
    ///
    /// List options accept comma-separated values from the environment,
    /// e.g. `REQLOG__REQUEST_LOG__SKIP_METHODS=OPTIONS,HEAD`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("REQLOG")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("request_log.skip_methods")
                    .with_list_parse_key("request_log.skip_paths"),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
