use std::time::Duration;

use axum::{http::StatusCode, middleware, response::IntoResponse, Router};
use tower_http::cors::CorsLayer;
use tower_http::timeout::{ResponseBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

use crate::api::middleware::error_handler::handle_reported_errors;
use crate::api::middleware::request_id::request_id;
use crate::app_state::AppState;

/// Build the main application router
pub fn app_router(request_timeout: Duration) -> Router<AppState> {
    Router::new()
        .merge(crate::api::routes::timeseries_routes::timeseries_routes())
        // Fallback handler for 404
        .fallback(handler_404)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            request_timeout,
        ))
        // turns reported errors and handler timeouts into problem documents
        .layer(middleware::from_fn(handle_reported_errors))
        // streamed exports: gap between two body chunks
        .layer(ResponseBodyTimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id))
        .layer(CorsLayer::very_permissive())
}

// Handler for 404 Not Found
async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
