//! TOML-backed session store.

use crate::paths::ChatGatePaths;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use chatgate_core::session::{Session, SessionStore};
use chatgate_core::{ChatGateError, Result};

/// Keeps the session marker in `session.toml`.
///
/// File access runs on the blocking pool so the caller's runtime thread is
/// never stalled on disk I/O.
#[derive(Debug, Clone)]
pub struct TomlSessionStore {
    file: AtomicTomlFile<Session>,
}

impl TomlSessionStore {
    pub fn new(paths: &ChatGatePaths) -> Self {
        Self {
            file: AtomicTomlFile::new(paths.session_file()),
        }
    }

    async fn blocking<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(AtomicTomlFile<Session>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || f(file))
            .await
            .map_err(|e| ChatGateError::internal(format!("Failed to join task: {e}")))?
    }
}

#[async_trait]
impl SessionStore for TomlSessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        self.blocking(|file| Ok(file.load()?)).await
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let session = session.clone();
        let email = session.email.clone();
        self.blocking(move |file| Ok(file.save(&session)?)).await?;
        tracing::info!(%email, "session stored");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|file| Ok(file.remove()?)).await?;
        tracing::info!("session cleared");
        Ok(())
    }
}
