//! Chat collaborator trait.

use crate::error::Result;
use crate::history::UserId;
use async_trait::async_trait;

/// The remote service that answers prompts.
///
/// The whole reply is returned at once; incremental display is the job of
/// [`RevealSequence`](crate::conversation::RevealSequence).
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Sends a prompt and returns the raw `response` text.
    ///
    /// An empty string is a valid answer; callers decide how to show it.
    async fn chat(&self, prompt: &str, user: Option<UserId>) -> Result<String>;
}
