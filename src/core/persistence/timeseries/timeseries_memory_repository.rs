//! In-memory repository used by the service and router tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use futures::future;
use futures::stream::{self, StreamExt};

use super::data_point_entity::DataPoint;
use super::query_catalog::{QueryName, QueryParam, SelectedQuery};
use super::series_summary_entity::SeriesSummary;
use super::timeseries_api_repository_trait::{DataPointStream, TimeseriesApiRepository};

#[derive(Default)]
pub struct TimeseriesMemoryRepository {
    series: BTreeMap<String, Vec<DataPoint>>,
    /// Every range query that reached the repository, in call order.
    pub executed: Mutex<Vec<SelectedQuery>>,
    pub existence_checks: Mutex<Vec<String>>,
    pub fail_queries: bool,
    /// Yields this many rows, then a row error.
    pub fail_stream_after: Option<usize>,
    /// Yields this many rows, then never another one.
    pub stall_stream_after: Option<usize>,
    pub stall_existence_check: bool,
}

impl TimeseriesMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series_id: &str, mut points: Vec<DataPoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        self.series.insert(series_id.to_string(), points);
        self
    }

    /// Ten evenly spaced samples between 2023-06-01T00:00Z and 2023-06-02T00:00Z.
    pub fn with_scenario_series(self) -> Self {
        let start = DateTime::parse_from_rfc3339("2023-06-01T00:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        let points = (0..10)
            .map(|i| DataPoint {
                timestamp: start + chrono::Duration::minutes(i * 160),
                value: if i == 4 { None } else { Some(0.125 * i as f64 + 1.5) },
            })
            .collect();
        self.with_series("045010", points)
    }

    pub fn failing(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub fn failing_after_rows(mut self, rows: usize) -> Self {
        self.fail_stream_after = Some(rows);
        self
    }

    pub fn stalling_after_rows(mut self, rows: usize) -> Self {
        self.stall_stream_after = Some(rows);
        self
    }

    pub fn stalling_existence_check(mut self) -> Self {
        self.stall_existence_check = true;
        self
    }

    pub fn executed_queries(&self) -> Vec<SelectedQuery> {
        self.executed.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<()> {
        if self.fail_queries {
            return Err(anyhow!("connection refused"));
        }
        Ok(())
    }
}

fn timestamp_at(params: &[QueryParam], idx: usize) -> Result<DateTime<FixedOffset>> {
    match params.get(idx) {
        Some(QueryParam::Timestamp(ts)) => Ok(*ts),
        other => Err(anyhow!("expected timestamp at ${}, got {:?}", idx + 1, other)),
    }
}

#[async_trait]
impl TimeseriesApiRepository for TimeseriesMemoryRepository {
    async fn list_series(&self) -> Result<Vec<SeriesSummary>> {
        self.check_available()?;
        Ok(self
            .series
            .iter()
            .filter_map(|(id, points)| {
                Some(SeriesSummary {
                    series_id: id.clone(),
                    first_entry: points.first()?.timestamp,
                    last_entry: points.last()?.timestamp,
                })
            })
            .collect())
    }

    async fn series_exists(&self, series_id: &str) -> Result<bool> {
        self.existence_checks.lock().unwrap().push(series_id.to_string());
        if self.stall_existence_check {
            future::pending::<()>().await;
        }
        self.check_available()?;
        Ok(self.series.contains_key(series_id))
    }

    async fn stream_points(&self, query: &SelectedQuery) -> Result<DataPointStream> {
        self.executed.lock().unwrap().push(query.clone());
        self.check_available()?;

        let series_id = match query.params.first() {
            Some(QueryParam::SeriesId(id)) => id.clone(),
            other => return Err(anyhow!("expected series id at $1, got {:?}", other)),
        };
        let (from, until) = match query.name {
            QueryName::Timeseries => (None, None),
            QueryName::DaterangeUntil => (None, Some(timestamp_at(&query.params, 1)?)),
            QueryName::DaterangeFrom => (Some(timestamp_at(&query.params, 1)?), None),
            QueryName::Daterange => (
                Some(timestamp_at(&query.params, 1)?),
                Some(timestamp_at(&query.params, 2)?),
            ),
            other => return Err(anyhow!("{} is not a range query", other.as_str())),
        };

        let points: Vec<DataPoint> = self
            .series
            .get(&series_id)
            .into_iter()
            .flatten()
            .filter(|p| from.map_or(true, |from| p.timestamp >= from))
            .filter(|p| until.map_or(true, |until| p.timestamp <= until))
            .cloned()
            .collect();

        let mut rows: Vec<Result<DataPoint>> = points.into_iter().map(Ok).collect();
        if let Some(after) = self.fail_stream_after {
            rows.truncate(after);
            rows.push(Err(anyhow!("connection reset while reading rows")));
        }
        if let Some(after) = self.stall_stream_after {
            rows.truncate(after);
            return Ok(stream::iter(rows).chain(stream::pending()).boxed());
        }
        Ok(stream::iter(rows).boxed())
    }
}
