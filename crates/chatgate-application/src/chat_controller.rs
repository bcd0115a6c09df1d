//! Chat screen controller.
//!
//! `ChatController` is the single owner of the conversation for a signed-in
//! user. Every mutation takes `&mut self`, so two replies can never be
//! fetched at once; the conversation's in-flight guard turns overlapping
//! sends and edits into no-ops on top of that.
//!
//! A reply goes through four steps:
//!
//! 1. the conversation queues it (a user message plus a `"typing"` placeholder)
//! 2. the chat collaborator answers with the full text; cancelling while
//!    waiting fails the reply
//! 3. the text is revealed one character at a time; cancelling shows the rest
//! 4. the turn is persisted to the history store

use crate::observer::ConversationObserver;
use chatgate_core::chat::ChatService;
use chatgate_core::conversation::{
    Conversation, EMPTY_REPLY_TEXT, MessageId, PendingReply, ReplyKind, RevealSequence,
};
use chatgate_core::history::{HistoryStore, QaPair, UserDirectory, UserId};
use chatgate_core::session::Session;
use chatgate_core::{ChatGateError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// What became of a send or edit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Blank input, or a reply was already in flight.
    Ignored,
    /// The reply was shown and stored.
    Delivered,
    /// The chat call failed or was abandoned; the placeholder shows the
    /// error text.
    Failed { reason: String },
    /// The reply was shown but could not be stored.
    Unsaved { reason: String },
}

pub struct ChatController {
    session: Session,
    user: UserId,
    conversation: Conversation,
    chat: Arc<dyn ChatService>,
    history: Arc<dyn HistoryStore>,
    reveal_delay: Duration,
}

impl ChatController {
    /// Resolves the session to a backend user and rebuilds the stored
    /// conversation.
    pub async fn open(
        session: Session,
        directory: &dyn UserDirectory,
        history: Arc<dyn HistoryStore>,
        chat: Arc<dyn ChatService>,
        reveal_delay: Duration,
    ) -> Result<Self> {
        let user = directory.lookup(&session.email).await?;
        let records = history.load(user).await?;
        tracing::info!(
            email = %session.email,
            %user,
            records = records.len(),
            "opened conversation"
        );

        Ok(Self {
            session,
            user,
            conversation: Conversation::from_records(records),
            chat,
            history,
            reveal_delay,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Sends a new prompt and waits until its reply is revealed and stored.
    pub async fn send(
        &mut self,
        prompt: &str,
        cancel: &CancellationToken,
        observer: &mut dyn ConversationObserver,
    ) -> Result<ReplyOutcome> {
        match self.conversation.send(prompt) {
            Some(pending) => self.deliver(pending, cancel, observer).await,
            None => Ok(ReplyOutcome::Ignored),
        }
    }

    /// Marks a user message as being edited. Returns `false` while a reply
    /// is in flight.
    pub fn begin_edit(&mut self, id: MessageId) -> Result<bool> {
        self.conversation.begin_edit(id)
    }

    pub fn cancel_edit(&mut self) {
        self.conversation.cancel_edit();
    }

    /// Rewrites a prompt and regenerates its reply in place.
    ///
    /// Fails with `NotFound` without touching state when `id` is not a user
    /// message.
    pub async fn submit_edit(
        &mut self,
        id: MessageId,
        text: &str,
        cancel: &CancellationToken,
        observer: &mut dyn ConversationObserver,
    ) -> Result<ReplyOutcome> {
        match self.conversation.submit_edit(id, text)? {
            Some(pending) => self.deliver(pending, cancel, observer).await,
            None => Ok(ReplyOutcome::Ignored),
        }
    }

    pub fn toggle_previous(&mut self, bot_id: MessageId) -> Result<()> {
        self.conversation.toggle_previous(bot_id)
    }

    /// Deletes the stored history, then empties the conversation.
    ///
    /// Returns `false` without calling the store while a reply is in flight.
    pub async fn clear(&mut self) -> Result<bool> {
        if self.conversation.is_in_flight() {
            return Ok(false);
        }
        self.history.clear(self.user).await?;
        let cleared = self.conversation.clear();
        tracing::info!(user = %self.user, "conversation cleared");
        Ok(cleared)
    }

    async fn deliver(
        &mut self,
        pending: PendingReply,
        cancel: &CancellationToken,
        observer: &mut dyn ConversationObserver,
    ) -> Result<ReplyOutcome> {
        observer.on_change(&self.conversation, pending.bot_id);

        let reply = tokio::select! {
            biased;
            reply = self.chat.chat(&pending.prompt, Some(self.user)) => reply,
            _ = cancel.cancelled() => Err(ChatGateError::cancelled("stopped waiting for the reply")),
        };
        let answer = match reply {
            Ok(text) if text.is_empty() => EMPTY_REPLY_TEXT.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(bot_id = %pending.bot_id, error = %e, "chat request failed");
                self.conversation.fail_reply(pending.bot_id)?;
                observer.on_change(&self.conversation, pending.bot_id);
                return Ok(ReplyOutcome::Failed {
                    reason: e.to_string(),
                });
            }
        };

        self.reveal(pending.bot_id, &answer, cancel, observer).await?;
        self.conversation.complete_reply(pending.bot_id)?;

        match self.persist(&pending, &answer).await {
            Ok(()) => Ok(ReplyOutcome::Delivered),
            Err(e) => {
                tracing::warn!(user_id = %pending.user_id, kind = ?pending.kind, error = %e, "reply not stored");
                Ok(ReplyOutcome::Unsaved {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Shows `text` one character at a time. A cancelled token jumps to the
    /// full text.
    async fn reveal(
        &mut self,
        bot_id: MessageId,
        text: &str,
        cancel: &CancellationToken,
        observer: &mut dyn ConversationObserver,
    ) -> Result<()> {
        self.conversation.begin_reveal(bot_id)?;
        let mut chars = RevealSequence::new(text);
        while let Some(ch) = chars.next() {
            self.conversation.reveal_char(bot_id, ch)?;
            observer.on_change(&self.conversation, bot_id);
            if chars.is_finished() {
                break;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(%bot_id, skipped = chars.size_hint().0, "reveal skipped");
                    self.conversation.reveal(bot_id, chars.finish())?;
                    observer.on_change(&self.conversation, bot_id);
                    break;
                }
                _ = tokio::time::sleep(self.reveal_delay) => {}
            }
        }
        Ok(())
    }

    async fn persist(&mut self, pending: &PendingReply, answer: &str) -> Result<()> {
        let pair = QaPair::new(pending.prompt.as_str(), answer);
        match pending.kind {
            ReplyKind::New => {
                let record = self.history.append(self.user, &pair).await?;
                self.conversation
                    .attach_backing_id(pending.user_id, record.id)?;
                tracing::info!(record = %record.id, "stored new turn");
            }
            ReplyKind::Edit => {
                let record = pending.backing_id.ok_or_else(|| {
                    ChatGateError::data_integrity(format!(
                        "edited message {} has no stored record",
                        pending.user_id
                    ))
                })?;
                self.history.update(record, &pair).await?;
                tracing::info!(%record, "stored edited turn");
            }
        }
        Ok(())
    }
}
