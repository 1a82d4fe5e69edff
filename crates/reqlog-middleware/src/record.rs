//! Per-request log records and error messages attached by handlers.

use std::time::Duration;

use axum::response::Response;
use chrono::{DateTime, FixedOffset, Local, Utc};

use reqlog_core::Severity;

/// Message used when a request finished without attached errors.
pub const DEFAULT_MESSAGE: &str = "Request";

/// Error messages accumulated while handling a request.
///
/// Handlers (or error types' `IntoResponse` impls) store these in the
/// response extensions; the logger joins them into the record message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestErrors(Vec<String>);

impl RequestErrors {
    /// Appends a message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Whether no message was attached.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attached messages in order.
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// Messages joined with `;`.
    pub fn joined(&self) -> String {
        self.0.join(";")
    }
}

/// Attaches an error message to a response so the request logger reports it.
pub fn attach_error(response: &mut Response, message: impl Into<String>) {
    let extensions = response.extensions_mut();
    match extensions.get_mut::<RequestErrors>() {
        Some(errors) => errors.push(message),
        None => {
            let mut errors = RequestErrors::default();
            errors.push(message);
            extensions.insert(errors);
        }
    }
}

/// Request data captured before the downstream chain runs.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    /// HTTP method.
    pub method: String,
    /// Normalized path including the query string.
    pub path: String,
    /// Resolved client address, empty when unknown.
    pub client_ip: String,
    /// `User-Agent` header, empty when absent.
    pub user_agent: String,
}

/// One structured log record describing a finished request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    /// Severity chosen from the status code.
    pub severity: Severity,
    /// `"Request"` or the `;`-joined attached errors.
    pub message: String,
    /// Final status code.
    pub status: u16,
    /// HTTP method.
    pub method: String,
    /// Normalized path.
    pub path: String,
    /// Client address.
    pub client_ip: String,
    /// `User-Agent` header.
    pub user_agent: String,
    /// Time spent in the downstream chain.
    pub latency: Duration,
    /// End timestamp, local or UTC depending on configuration.
    pub timestamp: DateTime<FixedOffset>,
}

impl RequestRecord {
    /// Completes a pending request with its outcome.
    pub fn complete(
        pending: PendingRequest,
        status: u16,
        errors: Option<&RequestErrors>,
        latency: Duration,
        utc: bool,
    ) -> Self {
        let message = match errors {
            Some(errors) if !errors.is_empty() => errors.joined(),
            _ => DEFAULT_MESSAGE.to_string(),
        };
        let timestamp = if utc {
            Utc::now().fixed_offset()
        } else {
            Local::now().fixed_offset()
        };

        Self {
            severity: Severity::for_status(status),
            message,
            status,
            method: pending.method,
            path: pending.path,
            client_ip: pending.client_ip,
            user_agent: pending.user_agent,
            latency,
            timestamp,
        }
    }
}
