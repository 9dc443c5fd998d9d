use std::sync::Arc;

use crate::core::persistence::timeseries::timeseries_api_repository_trait::{
    DataPointStream, TimeseriesApiRepository,
};
use crate::core::persistence::timeseries::series_summary_entity::SeriesSummary;
use crate::errors::AppError;

macro_rules! delegate_repo_service {
    ($(fn $name:ident($($arg:ident : $typ:ty),*) -> $ret:ty => $path:path;)+) => {
        $(
            pub async fn $name(&self, $($arg: $typ),*) -> Result<$ret, AppError> {
                $path(self.repo.as_ref(), $($arg),*).await
            }
        )+
    };
}

#[derive(Clone)]
pub struct AppState {
    pub timeseries_service: Arc<TimeseriesService>,
}

pub fn build_app_state(repo: Arc<dyn TimeseriesApiRepository>) -> AppState {
    AppState {
        timeseries_service: Arc::new(TimeseriesService::new(repo)),
    }
}

pub struct TimeseriesService {
    repo: Arc<dyn TimeseriesApiRepository>,
}

impl TimeseriesService {
    pub fn new(repo: Arc<dyn TimeseriesApiRepository>) -> Self {
        Self { repo }
    }

    delegate_repo_service! {
        fn list_series() -> Vec<SeriesSummary> => crate::domain::timeseries::service::catalog_service::list_series_with_repo;
        fn select(series_id: &str, from: Option<&str>, until: Option<&str>) -> DataPointStream => crate::domain::timeseries::service::range_query_service::select_with_repo;
    }
}
