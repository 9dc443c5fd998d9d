pub mod data_point_entity;
pub mod query_catalog;
pub mod series_summary_entity;
pub mod timeseries_api_repository_trait;
pub mod timeseries_repository;

#[cfg(test)]
pub mod timeseries_memory_repository;
