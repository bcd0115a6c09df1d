//! Session store trait.
//!
//! Defines the interface for the client-local session marker.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// Client-local storage for the session marker.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the stored session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: A user is signed in
    /// - `Ok(None)`: No session stored
    /// - `Err(_)`: Error occurred during retrieval
    async fn load(&self) -> Result<Option<Session>>;

    /// Stores the session, replacing any previous one.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes the stored session. Succeeds when nothing is stored.
    async fn clear(&self) -> Result<()>;
}
