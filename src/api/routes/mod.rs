//! API route declarations

pub mod timeseries_routes;
