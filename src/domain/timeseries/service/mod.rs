pub mod catalog_service;
pub mod export_service;
pub mod range_query_service;
