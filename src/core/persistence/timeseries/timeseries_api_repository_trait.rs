use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;

use super::data_point_entity::DataPoint;
use super::query_catalog::SelectedQuery;
use super::series_summary_entity::SeriesSummary;

/// Rows of a range query, yielded as the database sends them.
pub type DataPointStream = BoxStream<'static, Result<DataPoint>>;

/// Read-only access to the stored smart meter series (API layer).
#[async_trait]
pub trait TimeseriesApiRepository: Send + Sync {
    /// First and last sample time of every known series.
    async fn list_series(&self) -> Result<Vec<SeriesSummary>>;

    async fn series_exists(&self, series_id: &str) -> Result<bool>;

    /// Runs one of the range query variants. Rows arrive ordered by timestamp.
    async fn stream_points(&self, query: &SelectedQuery) -> Result<DataPointStream>;
}
