//! Request-scoped timeseries types

pub mod output_format;
pub mod range_filter;

pub use output_format::OutputFormat;
pub use range_filter::RangeFilter;
