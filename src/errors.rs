use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("timeseries '{0}' not found")]
    NotFound(String),

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("query failed: {0:#}")]
    QueryError(#[source] anyhow::Error),

    #[error("encoding failed: {0:#}")]
    EncodeError(#[source] anyhow::Error),

    #[error("request timed out")]
    Timeout,
}

/// Helper for mapping any storage failure into a query error
pub fn query_error<E: Into<anyhow::Error>>(err: E) -> AppError {
    AppError::QueryError(err.into())
}

/// Helper for mapping any serialization failure into an encode error
pub fn encode_error<E: Into<anyhow::Error>>(err: E) -> AppError {
    AppError::EncodeError(err.into())
}

/// Structured error body sent to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: u16,
    pub title: String,
    pub detail: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidTimestamp(_) => StatusCode::BAD_REQUEST,
            AppError::QueryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::EncodeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }

    /// Caller-facing description. Storage and encoding causes stay in the logs.
    pub fn problem(&self) -> ProblemDetails {
        let (kind, title, detail) = match self {
            AppError::NotFound(_) => (
                "https://www.rfc-editor.org/rfc/rfc9110#section-15.5.5",
                "Timeseries Not Found",
                "The timeseries with the supplied smartmeter ID does not exist",
            ),
            AppError::InvalidTimestamp(_) => (
                "https://www.rfc-editor.org/rfc/rfc9110#section-15.5.1",
                "Invalid Timestamp Provided",
                "A timestamp provided in the request did not follow the required ISO 8601 format",
            ),
            AppError::QueryError(_) => (
                "https://www.rfc-editor.org/rfc/rfc9110#section-15.6.1",
                "Database Query Failed",
                "An error occurred while querying the timeseries database",
            ),
            AppError::EncodeError(_) => (
                "https://www.rfc-editor.org/rfc/rfc9110#section-15.6.1",
                "Response Encoding Failed",
                "An error occurred while encoding the response body",
            ),
            AppError::Timeout => (
                "https://www.rfc-editor.org/rfc/rfc9110#section-15.6.5",
                "Request Timed Out",
                "The request could not be completed within the configured time limit",
            ),
        };

        ProblemDetails {
            kind: kind.to_string(),
            status: self.status().as_u16(),
            title: title.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// An error handed over to the error pipeline, waiting to be rendered.
#[derive(Debug, Clone)]
pub struct ReportedError(pub Arc<AppError>);

impl IntoResponse for AppError {
    /// Only reports the failure. The body is rendered by
    /// [`crate::api::middleware::error_handler::handle_reported_errors`].
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let mut response = status.into_response();
        response
            .extensions_mut()
            .insert(ReportedError(Arc::new(self)));
        response
    }
}
