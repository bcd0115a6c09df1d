//! History store and user directory traits.
//!
//! These are the storage port of the chat screen. The conversation is owned
//! in memory by the controller; the store only mirrors completed turns.

use super::model::{HistoryRecord, QaPair, RecordId, UserId};
use crate::error::Result;
use async_trait::async_trait;

/// Resolves a session email to the backend user identifier.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Looks up a user by email.
    ///
    /// # Returns
    ///
    /// - `Ok(UserId)`: User exists
    /// - `Err(ChatGateError::NotFound)`: No user with that email
    /// - `Err(_)`: Any other failure
    async fn lookup(&self, email: &str) -> Result<UserId>;
}

/// Persistence of completed conversation turns, keyed by user.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Lists a user's records in send order.
    async fn load(&self, user: UserId) -> Result<Vec<HistoryRecord>>;

    /// Stores a new turn and returns the created record.
    async fn append(&self, user: UserId, pair: &QaPair) -> Result<HistoryRecord>;

    /// Replaces the question and answer of an existing record.
    async fn update(&self, record: RecordId, pair: &QaPair) -> Result<()>;

    /// Deletes every record of a user.
    async fn clear(&self, user: UserId) -> Result<()>;
}
