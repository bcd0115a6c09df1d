//! Configuration service implementation.
//!
//! Loads `ClientConfig` from `config.toml`, creating the file with defaults
//! on first run, then applies environment overrides.

use crate::paths::ChatGatePaths;
use crate::storage::AtomicTomlFile;
use chatgate_core::config::ClientConfig;
use chatgate_core::{ChatGateError, Result};

pub const SERVICE_URL_ENV: &str = "CHATGATE_SERVICE_URL";
pub const REVEAL_DELAY_ENV: &str = "CHATGATE_REVEAL_DELAY_MS";
pub const LOG_FILTER_ENV: &str = "CHATGATE_LOG";

/// Loads the client configuration from disk.
#[derive(Debug, Clone)]
pub struct ConfigService {
    file: AtomicTomlFile<ClientConfig>,
}

impl ConfigService {
    pub fn new(paths: &ChatGatePaths) -> Self {
        Self {
            file: AtomicTomlFile::new(paths.config_file()),
        }
    }

    /// Loads the file (writing defaults if missing) and applies the process
    /// environment on top.
    pub fn load(&self) -> Result<ClientConfig> {
        self.load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an injectable variable lookup.
    pub fn load_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<ClientConfig> {
        let config = self.file.load_or_create(ClientConfig::default())?;
        tracing::debug!(path = %self.file.path().display(), "loaded client config");
        apply_env_overrides(config, lookup)
    }
}

/// Overrides config values with `CHATGATE_*` variables when set.
pub fn apply_env_overrides(
    mut config: ClientConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig> {
    if let Some(url) = lookup(SERVICE_URL_ENV) {
        config.service_url = url;
    }
    if let Some(delay) = lookup(REVEAL_DELAY_ENV) {
        config.reveal_delay_ms = delay.trim().parse().map_err(|_| {
            ChatGateError::config(format!("{REVEAL_DELAY_ENV} must be an integer, got '{delay}'"))
        })?;
    }
    if let Some(filter) = lookup(LOG_FILTER_ENV) {
        config.log_filter = filter;
    }
    Ok(config)
}
