use anyhow::{Context, Result};
use tokio_postgres::{Client, NoTls};
use tracing::{error, info};

use crate::core::config::DatabaseConfig;

/// Opens the shared database client and verifies it with a round trip.
///
/// The connection driver runs on its own task; once it stops, every
/// further query on the client fails and surfaces as a query error.
pub async fn connect(config: &DatabaseConfig) -> Result<Client> {
    info!(host = %config.host, port = config.port, database = %config.database, "connecting to the database");

    let (client, connection) = config
        .to_pg_config()
        .connect(NoTls)
        .await
        .context("unable to connect to the database")?;

    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(error = %err, "database connection closed with error");
        }
    });

    client
        .simple_query("SELECT 1")
        .await
        .context("unable to verify the connection to the database")?;

    info!("database connection established");
    Ok(client)
}
