use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::Response;
use axum::Json;

use crate::api::dto::timeseries_dto::TimeseriesQuery;
use crate::app_state::AppState;
use crate::core::persistence::timeseries::series_summary_entity::SeriesSummary;
use crate::domain::timeseries::model::OutputFormat;
use crate::domain::timeseries::service::export_service;
use crate::errors::AppError;

pub struct TimeseriesController;

impl TimeseriesController {
    pub async fn overview(
        State(state): State<AppState>,
    ) -> Result<Json<Vec<SeriesSummary>>, AppError> {
        Ok(Json(state.timeseries_service.list_series().await?))
    }

    pub async fn timeseries(
        State(state): State<AppState>,
        uri: Uri,
        series_id: Result<Path<String>, PathRejection>,
        Query(pairs): Query<Vec<(String, String)>>,
    ) -> Result<Response, AppError> {
        // ids that do not decode to UTF-8 cannot be stored, so they name no series
        let Path(series_id) = series_id.map_err(|_| {
            AppError::NotFound(uri.path().trim_start_matches('/').to_string())
        })?;
        let query = TimeseriesQuery::from_pairs(pairs);

        let points = state
            .timeseries_service
            .select(&series_id, query.from.as_deref(), query.until.as_deref())
            .await?;

        export_service::encode(points, OutputFormat::from(query.format.as_deref())).await
    }
}
