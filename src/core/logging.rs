use anyhow::{anyhow, Result};
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::LogConfig;

const LOG_FILE_PREFIX: &str = "smartmeter-rest.log";

/// Installs the global subscriber. Keep the returned guard alive until
/// shutdown, otherwise buffered lines are lost.
pub fn init_tracing(config: &LogConfig) -> Result<WorkerGuard> {
    let (filter, fallback) = match EnvFilter::try_new(&config.level) {
        Ok(filter) => (filter, false),
        Err(_) => (EnvFilter::new("info"), true),
    };

    let (writer, guard) = match &config.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            tracing_appender::non_blocking(appender)
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(config.dir.is_none())
        .with_writer(writer)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    if fallback {
        warn!(level = %config.level, "unable to parse LOG_LEVEL, using info");
    }

    Ok(guard)
}
