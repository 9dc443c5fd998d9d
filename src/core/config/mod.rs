//! Service configuration read from the process environment

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

const DEFAULT_LISTEN_PORT: u16 = 8000;
const DEFAULT_PG_PORT: u16 = 5432;
const DEFAULT_PG_DATABASE: &str = "wisdom";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl DatabaseConfig {
    /// Builds a `tokio_postgres` configuration without going through a URL,
    /// so credentials containing reserved characters need no escaping.
    pub fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .user(&self.user)
            .password(&self.password)
            .host(&self.host)
            .port(self.port)
            .dbname(&self.database)
            .application_name(env!("CARGO_PKG_NAME"));
        config
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_port: u16,
    pub database: DatabaseConfig,
    pub query_file: Option<PathBuf>,
    pub log: LogConfig,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| {
            optional(key).ok_or_else(|| anyhow!("required environment variable {key} is not set"))
        };

        let database = DatabaseConfig {
            user: required("PG_USER")?,
            password: lookup("PG_PASS")
                .ok_or_else(|| anyhow!("required environment variable PG_PASS is not set"))?,
            host: required("PG_HOST")?,
            port: parse_or(optional("PG_PORT"), "PG_PORT", DEFAULT_PG_PORT)?,
            database: optional("PG_DATABASE").unwrap_or_else(|| DEFAULT_PG_DATABASE.to_string()),
        };

        Ok(Self {
            listen_port: parse_or(optional("LISTEN_PORT"), "LISTEN_PORT", DEFAULT_LISTEN_PORT)?,
            database,
            query_file: optional("QUERY_FILE_LOCATION").map(PathBuf::from),
            log: LogConfig {
                level: optional("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
                dir: optional("LOG_DIR").map(PathBuf::from),
            },
            http_timeout: Duration::from_secs(parse_or(
                optional("HTTP_TIMEOUT_SECS"),
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("environment variable {key} has invalid value '{value}'")),
        None => Ok(default),
    }
}
