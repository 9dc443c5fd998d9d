//! Renders reported errors.
//!
//! Handlers never write an error body themselves: an `AppError` returned from a
//! handler turns into a bodyless response carrying a [`ReportedError`]. This
//! layer picks it up, logs it and writes the problem document, so the body of a
//! failed request is written exactly once and always by the pipeline.
//!
//! The handler timeout sits inside this layer and answers with a bare 504,
//! which is rendered as [`AppError::Timeout`].

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error};

use crate::errors::{AppError, ReportedError};

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

pub async fn handle_reported_errors(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let err = match response.extensions_mut().remove::<ReportedError>() {
        Some(ReportedError(err)) => err,
        None if response.status() == StatusCode::GATEWAY_TIMEOUT => Arc::new(AppError::Timeout),
        None => return response,
    };

    if err.is_server_error() {
        error!(error = ?err, %method, path = %path, "request failed");
    } else {
        debug!(error = %err, %method, path = %path, "request rejected");
    }

    let problem = err.problem();
    let mut rendered = (response.status(), Json(problem)).into_response();
    rendered.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
    );
    for (name, value) in response.headers() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rendered.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rendered
}
