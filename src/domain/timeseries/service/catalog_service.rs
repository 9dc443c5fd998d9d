use crate::core::persistence::timeseries::series_summary_entity::SeriesSummary;
use crate::core::persistence::timeseries::timeseries_api_repository_trait::TimeseriesApiRepository;
use crate::errors::{query_error, AppError};

/// Reads the catalog fresh from storage on every call.
pub async fn list_series_with_repo<R: TimeseriesApiRepository + ?Sized>(
    repo: &R,
) -> Result<Vec<SeriesSummary>, AppError> {
    repo.list_series().await.map_err(query_error)
}
