//! The request logger and its axum middleware.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use axum::extract::{FromRequestParts, RawPathParams, Request, State};
use axum::http::header::USER_AGENT;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;
use regex::Regex;

use reqlog_core::config::request_log::RequestLogConfig;
use reqlog_core::{AppResult, Severity};

use crate::client_ip::client_ip;
use crate::path::normalize_path;
use crate::record::{PendingRequest, RequestErrors, RequestRecord};
use crate::rules::SkipRules;
use crate::sink::LogSink;

/// Request logger shared by every request. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    min_severity: Severity,
    rules: SkipRules,
    utc: bool,
    sink: Arc<dyn LogSink>,
}

impl RequestLogger {
    /// Builds a logger from configuration and an injected sink.
    ///
    /// Fails with a configuration error on an unrecognized level or an
    /// invalid skip pattern.
    pub fn new(config: &RequestLogConfig, sink: Arc<dyn LogSink>) -> AppResult<Self> {
        let min_severity = config.severity()?;
        let rules = SkipRules::from_config(config)?;
        Ok(Self::from_parts(min_severity, rules, config.utc, sink))
    }

    /// Logger at `debug` level with no skip rules and local timestamps.
    pub fn with_defaults(sink: Arc<dyn LogSink>) -> Self {
        Self::from_parts(Severity::default(), SkipRules::default(), false, sink)
    }

    /// Assembles a logger from already-validated parts.
    pub fn from_parts(
        min_severity: Severity,
        rules: SkipRules,
        utc: bool,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                min_severity,
                rules,
                utc,
                sink,
            }),
        }
    }

    /// Copy of this logger using a pre-compiled skip pattern.
    pub fn with_skip_pattern(&self, pattern: Regex) -> Self {
        Self::from_parts(
            self.inner.min_severity,
            self.inner.rules.clone().with_pattern(pattern),
            self.inner.utc,
            Arc::clone(&self.inner.sink),
        )
    }

    /// Minimum severity written to the sink.
    pub fn min_severity(&self) -> Severity {
        self.inner.min_severity
    }

    /// Applies skip rules and writes one record for a finished request.
    ///
    /// Returns the record when one was written.
    pub fn complete(
        &self,
        pending: PendingRequest,
        status: u16,
        errors: Option<&RequestErrors>,
        latency: Duration,
    ) -> Option<RequestRecord> {
        if self.inner.rules.should_skip(&pending.method, &pending.path) {
            return None;
        }

        let record = RequestRecord::complete(pending, status, errors, latency, self.inner.utc);
        if record.severity < self.inner.min_severity {
            return None;
        }
        self.inner.sink.emit(&record);
        Some(record)
    }

    /// Installs the logging middleware on every route of `router`.
    ///
    /// Applied through [`Router::layer`], so it runs after routing and sees
    /// the matched route parameters. Routes added afterwards are not
    /// covered.
    pub fn install<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(from_fn_with_state(self.clone(), request_logging))
    }
}

/// Axum middleware writing one record per request through the logger.
pub async fn request_logging(
    State(logger): State<RequestLogger>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let (mut parts, body) = request.into_parts();
    let params = RawPathParams::from_request_parts(&mut parts, &()).await.ok();
    let path = normalize_path(
        parts.uri.path(),
        parts.uri.query(),
        params.iter().flat_map(|p| p.iter()),
    );
    let pending = PendingRequest {
        method: parts.method.as_str().to_owned(),
        path,
        client_ip: client_ip(&parts),
        user_agent: parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned(),
    };

    let response = next.run(Request::from_parts(parts, body)).await;

    logger.complete(
        pending,
        response.status().as_u16(),
        response.extensions().get::<RequestErrors>(),
        start.elapsed(),
    );
    response
}
