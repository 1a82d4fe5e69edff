//! Request logging configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::severity::Severity;

/// Which set of fields is written for each request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldProfile {
    /// Single-letter keys: `s`, `m`, `p`, `i`, `l`.
    #[default]
    Compact,
    /// Full keys: `status`, `method`, `path`, `ip`, `latency`,
    /// `user_agent`, `time`.
    Detailed,
}

/// Request logging middleware configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLogConfig {
    /// Minimum severity: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Human-readable output instead of JSON.
    #[serde(default)]
    pub development: bool,
    /// HTTP methods never logged.
    #[serde(default)]
    pub skip_methods: Vec<String>,
    /// Exact normalized paths never logged.
    #[serde(default, alias = "skip_urls")]
    pub skip_paths: Vec<String>,
    /// Normalized paths matching this pattern are never logged.
    #[serde(default, alias = "skip_url_regexp")]
    pub skip_path_regexp: Option<String>,
    /// Record the end timestamp in UTC rather than local time.
    #[serde(default)]
    pub utc: bool,
    /// Field set written per request.
    #[serde(default)]
    pub profile: FieldProfile,
}

impl Default for RequestLogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            development: false,
            skip_methods: Vec::new(),
            skip_paths: Vec::new(),
            skip_path_regexp: None,
            utc: false,
            profile: FieldProfile::default(),
        }
    }
}

impl RequestLogConfig {
    /// Parsed minimum severity.
    pub fn severity(&self) -> Result<Severity, AppError> {
        self.level.parse()
    }

    /// Compiled skip pattern, if one is configured. Blank patterns count as
    /// unset.
    pub fn skip_pattern(&self) -> Result<Option<Regex>, AppError> {
        match self.skip_path_regexp.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(pattern) => Ok(Some(Regex::new(pattern)?)),
        }
    }
}

fn default_level() -> String {
    "debug".to_string()
}
