use tracing::debug;

use crate::core::persistence::timeseries::query_catalog::{QueryName, QueryParam, SelectedQuery};
use crate::core::persistence::timeseries::timeseries_api_repository_trait::{
    DataPointStream, TimeseriesApiRepository,
};
use crate::domain::timeseries::model::RangeFilter;
use crate::errors::{query_error, AppError};

/// Picks one of the four pre-written range queries by which bounds are set.
pub fn select_query(series_id: &str, filter: &RangeFilter) -> SelectedQuery {
    let mut params = vec![QueryParam::SeriesId(series_id.to_string())];

    let name = match (filter.from, filter.until) {
        (None, None) => QueryName::Timeseries,
        (None, Some(until)) => {
            params.push(QueryParam::Timestamp(until));
            QueryName::DaterangeUntil
        }
        (Some(from), None) => {
            params.push(QueryParam::Timestamp(from));
            QueryName::DaterangeFrom
        }
        (Some(from), Some(until)) => {
            params.push(QueryParam::Timestamp(from));
            params.push(QueryParam::Timestamp(until));
            QueryName::Daterange
        }
    };

    SelectedQuery { name, params }
}

/// Existence check, then bound parsing, then the range query.
///
/// An unknown series is reported as `NotFound` before the bounds are looked at.
pub async fn select_with_repo<R: TimeseriesApiRepository + ?Sized>(
    repo: &R,
    series_id: &str,
    from: Option<&str>,
    until: Option<&str>,
) -> Result<DataPointStream, AppError> {
    if !repo.series_exists(series_id).await.map_err(query_error)? {
        return Err(AppError::NotFound(series_id.to_string()));
    }

    let filter = RangeFilter::parse(from, until)?;
    let query = select_query(series_id, &filter);
    debug!(series_id, query = query.name.as_str(), "selected range query");

    repo.stream_points(&query).await.map_err(query_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::persistence::timeseries::timeseries_memory_repository::TimeseriesMemoryRepository;
    use chrono::{DateTime, Utc};
    use futures::TryStreamExt;

    fn ts(raw: &str) -> chrono::DateTime<chrono::FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    #[test]
    fn parameters_follow_the_variant_table() {
        let from = ts("2023-06-01T15:00:00Z");
        let until = ts("2023-06-02T15:00:00Z");
        let id = || QueryParam::SeriesId("045010".into());

        let cases = [
            (None, None, QueryName::Timeseries, vec![id()]),
            (
                None,
                Some(until),
                QueryName::DaterangeUntil,
                vec![id(), QueryParam::Timestamp(until)],
            ),
            (
                Some(from),
                None,
                QueryName::DaterangeFrom,
                vec![id(), QueryParam::Timestamp(from)],
            ),
            (
                Some(from),
                Some(until),
                QueryName::Daterange,
                vec![id(), QueryParam::Timestamp(from), QueryParam::Timestamp(until)],
            ),
        ];

        for (from, until, name, params) in cases {
            let selected = select_query("045010", &RangeFilter { from, until });
            assert_eq!(selected, SelectedQuery { name, params });
        }
    }

    #[tokio::test]
    async fn unknown_series_is_not_found_even_with_bad_bounds() {
        let repo = TimeseriesMemoryRepository::new().with_scenario_series();

        for (from, until) in [(None, None), (Some("abc"), None), (Some("abc"), Some("def"))] {
            let err = select_with_repo(&repo, "999999", from, until).await.err().unwrap();
            assert!(matches!(err, AppError::NotFound(ref id) if id == "999999"));
        }
        assert!(repo.executed_queries().is_empty());
        assert_eq!(repo.existence_checks.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn bad_bound_on_known_series_is_invalid_timestamp() {
        let repo = TimeseriesMemoryRepository::new().with_scenario_series();

        for (from, until) in [
            (Some("abc"), None),
            (None, Some("2023-13-01T00:00:00Z")),
            (Some("2023-06-01T00:00:00Z"), Some("")),
        ] {
            let err = select_with_repo(&repo, "045010", from, until).await.err().unwrap();
            assert!(matches!(err, AppError::InvalidTimestamp(_)), "got {err:?}");
        }
        assert!(repo.executed_queries().is_empty());
    }

    #[tokio::test]
    async fn from_bound_returns_ascending_points_after_it() {
        let repo = TimeseriesMemoryRepository::new().with_scenario_series();
        let bound = ts("2023-06-01T15:00:00Z");

        let points: Vec<_> = select_with_repo(&repo, "045010", Some("2023-06-01T15:00:00Z"), None)
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();

        assert!(!points.is_empty());
        assert!(points.len() < 10);
        assert!(points.iter().all(|p| p.timestamp >= bound));
        assert!(points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(repo.executed_queries()[0].name, QueryName::DaterangeFrom);
    }

    #[tokio::test]
    async fn inverted_range_yields_empty_result() {
        let repo = TimeseriesMemoryRepository::new().with_scenario_series();

        let points: Vec<_> = select_with_repo(
            &repo,
            "045010",
            Some("2023-06-02T00:00:00Z"),
            Some("2023-06-01T00:00:00Z"),
        )
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();

        assert!(points.is_empty());
        assert_eq!(repo.executed_queries()[0].name, QueryName::Daterange);
    }

    #[tokio::test]
    async fn storage_failure_is_query_error() {
        let repo = TimeseriesMemoryRepository::new().with_scenario_series().failing();

        let err = select_with_repo(&repo, "045010", None, None).await.err().unwrap();
        assert!(matches!(err, AppError::QueryError(_)));
    }

    #[tokio::test]
    async fn until_bound_is_inclusive() {
        let repo = TimeseriesMemoryRepository::new().with_scenario_series();

        let points: Vec<_> = select_with_repo(&repo, "045010", None, Some("2023-06-01T00:00:00Z"))
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(
            points[0].timestamp,
            "2023-06-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }
}
