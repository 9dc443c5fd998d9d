//! Timeseries routes (`/` and `/{series_id}`)

use axum::{routing::get, Router};

use crate::api::controller::timeseries::TimeseriesController;
use crate::app_state::AppState;

pub fn timeseries_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(TimeseriesController::overview))
        .route("/{series_id}", get(TimeseriesController::timeseries))
}
