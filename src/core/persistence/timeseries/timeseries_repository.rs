use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::{StreamExt, TryStreamExt};
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, Row};
use tracing::{debug, error};

use super::data_point_entity::DataPoint;
use super::query_catalog::{QueryCatalog, QueryName, QueryParam, SelectedQuery};
use super::series_summary_entity::SeriesSummary;
use super::timeseries_api_repository_trait::{DataPointStream, TimeseriesApiRepository};

/// Postgres backed repository issuing the named catalog queries.
pub struct TimeseriesRepository {
    client: Arc<Client>,
    queries: QueryCatalog,
}

impl TimeseriesRepository {
    pub fn new(client: Arc<Client>, queries: QueryCatalog) -> Self {
        Self { client, queries }
    }

    fn summary_from_row(row: &Row) -> Result<SeriesSummary> {
        Ok(SeriesSummary {
            series_id: row.try_get::<_, String>(0)?,
            first_entry: row.try_get::<_, DateTime<Utc>>(1)?,
            last_entry: row.try_get::<_, DateTime<Utc>>(2)?,
        })
    }

    fn data_point_from_row(row: &Row) -> Result<DataPoint> {
        Ok(DataPoint {
            timestamp: row.try_get::<_, DateTime<Utc>>(0)?,
            value: row.try_get::<_, Option<f64>>(1)?,
        })
    }
}

#[async_trait]
impl TimeseriesApiRepository for TimeseriesRepository {
    async fn list_series(&self) -> Result<Vec<SeriesSummary>> {
        let rows = self
            .client
            .query(self.queries.get(QueryName::Overview), &[])
            .await
            .map_err(|err| {
                error!(error = %err, "Failed to read timeseries overview");
                err
            })?;

        rows.iter().map(Self::summary_from_row).collect()
    }

    async fn series_exists(&self, series_id: &str) -> Result<bool> {
        let row = self
            .client
            .query_one(self.queries.get(QueryName::Exists), &[&series_id])
            .await
            .map_err(|err| {
                error!(error = %err, series_id, "Failed to check timeseries existence");
                err
            })?;

        row.try_get::<_, bool>(0)
            .context("existence query did not return a boolean")
    }

    async fn stream_points(&self, query: &SelectedQuery) -> Result<DataPointStream> {
        debug!(query = query.name.as_str(), params = query.params.len(), "Running range query");

        let params: Vec<&(dyn ToSql + Sync)> = query.params.iter().map(QueryParam::as_sql).collect();
        let rows = self
            .client
            .query_raw(self.queries.get(query.name), params)
            .await
            .map_err(|err| {
                error!(error = %err, query = query.name.as_str(), "Failed to run range query");
                err
            })?;

        Ok(rows
            .map_err(anyhow::Error::from)
            .and_then(|row| futures::future::ready(Self::data_point_from_row(&row)))
            .boxed())
    }
}
