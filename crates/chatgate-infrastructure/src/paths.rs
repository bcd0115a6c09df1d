//! Unified path management for chatgate's local files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/chatgate/          # Config directory (or $CHATGATE_HOME)
//! ├── config.toml              # Client configuration
//! ├── session.toml             # Session marker (signed-in email)
//! └── logs/                    # Application logs
//!     └── chatgate.log.YYYY-MM-DD
//! ```

use chatgate_core::{ChatGateError, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "chatgate";

/// Environment variable overriding the config directory.
pub const HOME_ENV: &str = "CHATGATE_HOME";

/// Resolved locations of chatgate's local files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatGatePaths {
    root: PathBuf,
}

impl ChatGatePaths {
    /// Uses `root` as the config directory.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the config directory from `$CHATGATE_HOME`, falling back to
    /// the platform config directory.
    pub fn resolve() -> Result<Self> {
        Self::resolve_with(|key| std::env::var(key).ok())
    }

    /// Same as [`resolve`](Self::resolve) with an injectable variable lookup.
    pub fn resolve_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(home) = lookup(HOME_ENV).filter(|v| !v.trim().is_empty()) {
            return Ok(Self::from_root(home));
        }
        dirs::config_dir()
            .map(|dir| Self::from_root(dir.join(APP_DIR_NAME)))
            .ok_or_else(|| ChatGateError::config("Cannot find the platform config directory"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.root.join("session.toml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_root() {
        let paths = ChatGatePaths::from_root("/tmp/chatgate-test");
        assert!(paths.config_file().ends_with("config.toml"));
        assert!(paths.session_file().ends_with("session.toml"));
        assert!(paths.logs_dir().ends_with("logs"));
        assert!(paths.config_file().starts_with(paths.root()));
    }

    #[test]
    fn test_home_env_wins() {
        let paths = ChatGatePaths::resolve_with(|key| {
            (key == HOME_ENV).then(|| "/srv/chatgate".to_string())
        })
        .unwrap();
        assert_eq!(paths.root(), Path::new("/srv/chatgate"));
    }

    #[test]
    fn test_blank_home_env_is_ignored() {
        if let Ok(paths) = ChatGatePaths::resolve_with(|_| Some("  ".to_string())) {
            assert!(paths.root().ends_with(APP_DIR_NAME));
        }
    }
}
