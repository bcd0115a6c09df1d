use std::path::Path;

use anyhow::{Context, Result};
use chatgate_core::config::DEFAULT_LOG_FILTER;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "chatgate.log";

/// Sends tracing output to a daily rolling file under `logs_dir`, keeping
/// the interactive terminal free of log lines.
///
/// The returned guard flushes the writer on drop and must live until exit.
pub fn init(logs_dir: &Path, filter: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let (env_filter, rejected) = match EnvFilter::try_new(filter) {
        Ok(env_filter) => (env_filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    if let Some(e) = rejected {
        tracing::warn!(%filter, error = %e, "invalid log filter, using default");
    }
    Ok(guard)
}
