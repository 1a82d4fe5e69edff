//! Maps `AppError` to HTTP responses that carry the error for the logger.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use reqlog_core::error::{AppError, ErrorKind};

use crate::record::attach_error;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Handler error. Its message is attached to the response so the request
/// record reports it instead of the default message.
#[derive(Debug)]
pub struct HandlerError(pub AppError);

impl From<AppError> for HandlerError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl HandlerError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self.0.kind {
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Configuration | ErrorKind::Io | ErrorKind::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: self.0.message.clone(),
        };

        let mut response = (status, Json(body)).into_response();
        attach_error(&mut response, self.0.message);
        response
    }
}
