//! Skip rules deciding which requests are never logged.

use std::collections::HashSet;

use regex::Regex;

use reqlog_core::AppResult;
use reqlog_core::config::request_log::RequestLogConfig;

/// Immutable exclusion rules, built once at construction.
#[derive(Debug, Clone, Default)]
pub struct SkipRules {
    methods: HashSet<String>,
    paths: HashSet<String>,
    pattern: Option<Regex>,
}

impl SkipRules {
    /// Creates rules from explicit parts.
    pub fn new<M, P>(methods: M, paths: P, pattern: Option<Regex>) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
            paths: paths.into_iter().map(Into::into).collect(),
            pattern,
        }
    }

    /// Builds rules from configuration, compiling the skip pattern.
    pub fn from_config(config: &RequestLogConfig) -> AppResult<Self> {
        Ok(Self::new(
            config.skip_methods.iter().cloned(),
            config.skip_paths.iter().cloned(),
            config.skip_pattern()?,
        ))
    }

    /// Replaces the skip pattern with a pre-compiled one.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Whether a request should produce no log record. Checks method, then
    /// exact path, then pattern.
    pub fn should_skip(&self, method: &str, normalized_path: &str) -> bool {
        if self.methods.contains(method) {
            return true;
        }
        if self.paths.contains(normalized_path) {
            return true;
        }
        self.pattern
            .as_ref()
            .is_some_and(|re| re.is_match(normalized_path))
    }

    /// Whether no rule is configured.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.paths.is_empty() && self.pattern.is_none()
    }
}
