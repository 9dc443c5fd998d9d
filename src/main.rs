mod api;
mod app_state;
mod core;
mod domain;
mod errors;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::app_state::build_app_state;
use crate::core::config::AppConfig;
use crate::core::persistence::pg_client;
use crate::core::persistence::timeseries::query_catalog::QueryCatalog;
use crate::core::persistence::timeseries::timeseries_repository::TimeseriesRepository;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::from_env()?;
    let _log_guard = crate::core::logging::init_tracing(&config.log)?;
    if dotenv.is_err() {
        debug!("no .env file found");
    }
    info!("starting {}", env!("CARGO_PKG_NAME"));

    let queries = QueryCatalog::load(config.query_file.as_deref())?;
    let client = pg_client::connect(&config.database).await?;
    let repo = TimeseriesRepository::new(Arc::new(client), queries);
    let state = build_app_state(Arc::new(repo));

    let app = routes::app_router(config.http_timeout).with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("unable to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "unable to listen for the shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
