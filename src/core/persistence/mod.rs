//! Persistence collaborators (Postgres access and the named query catalog)

pub mod pg_client;
pub mod timeseries;
