//! Conversation state and its update functions.
//!
//! `Conversation` is the only owner of the ordered message list. Every change
//! goes through one of its methods, which keep these invariants:
//!
//! - each bot message has a `parent_id` naming a user message placed earlier
//! - at most one message is being edited
//! - edits replace a turn in place; only new sends append
//! - while a reply is in flight, send, edit and clear do nothing

use super::message::{Message, MessageId, REPLY_ERROR_TEXT};
use crate::error::{ChatGateError, Result};
use crate::history::{HistoryRecord, RecordId};

/// Whether a pending reply answers a new prompt or a rewritten one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    New,
    Edit,
}

/// A reply the caller must now fetch.
///
/// Returned when a send or edit was accepted. The bot placeholder is already
/// in the conversation and the in-flight guard is held until
/// [`Conversation::complete_reply`] or [`Conversation::fail_reply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub kind: ReplyKind,
    pub user_id: MessageId,
    pub bot_id: MessageId,
    pub prompt: String,
    /// Stored record of the turn, for edits of persisted turns.
    pub backing_id: Option<RecordId>,
}

/// The ordered message list plus the in-flight guard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
    in_flight: Option<MessageId>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a conversation from stored records.
    ///
    /// Each record becomes a user message followed by its bot reply, both
    /// carrying the record identifier as backing id.
    pub fn from_records(records: impl IntoIterator<Item = HistoryRecord>) -> Self {
        let mut messages = Vec::new();
        for record in records {
            let mut user = Message::user(record.question);
            let mut bot = Message::bot(user.id, record.answer);
            if let Some(timestamp) = record.timestamp {
                user.sent_at = timestamp;
                bot.sent_at = timestamp;
            }
            user.backing_id = Some(record.id);
            bot.backing_id = Some(record.id);
            messages.push(user);
            messages.push(bot);
        }
        Self {
            messages,
            in_flight: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn position(&self, id: MessageId) -> Option<usize> {
        self.messages.iter().position(|m| m.id == id)
    }

    /// Identifier of the bot placeholder awaiting its reply, if any.
    pub fn in_flight(&self) -> Option<MessageId> {
        self.in_flight
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The message currently being edited.
    pub fn editing(&self) -> Option<&Message> {
        self.messages.iter().find(|m| m.is_editing)
    }

    /// Iterates over user messages in order.
    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.is_user())
    }

    /// The bot message answering `user_id`.
    pub fn reply_to(&self, user_id: MessageId) -> Option<&Message> {
        self.messages
            .iter()
            .find(|m| m.is_bot() && m.parent_id == Some(user_id))
    }

    /// Appends a user message and a bot placeholder.
    ///
    /// Returns `None` without touching state when the prompt is blank or a
    /// reply is already in flight.
    pub fn send(&mut self, prompt: &str) -> Option<PendingReply> {
        if prompt.trim().is_empty() || self.guarded("send") {
            return None;
        }

        let user = Message::user(prompt);
        let bot = Message::placeholder(user.id);
        let pending = PendingReply {
            kind: ReplyKind::New,
            user_id: user.id,
            bot_id: bot.id,
            prompt: prompt.to_string(),
            backing_id: None,
        };

        tracing::debug!(user_id = %user.id, bot_id = %bot.id, "appending new turn");
        self.messages.push(user);
        self.messages.push(bot);
        self.in_flight = Some(pending.bot_id);
        Some(pending)
    }

    /// Marks a user message as being edited, clearing the flag elsewhere.
    ///
    /// Returns `Ok(false)` when a reply is in flight.
    pub fn begin_edit(&mut self, id: MessageId) -> Result<bool> {
        if self.guarded("begin edit") {
            return Ok(false);
        }
        self.user_index(id)?;
        for message in &mut self.messages {
            message.is_editing = message.id == id;
        }
        Ok(true)
    }

    /// Clears the editing flag on every message.
    pub fn cancel_edit(&mut self) {
        for message in &mut self.messages {
            message.is_editing = false;
        }
    }

    /// Rewrites a user message and queues regeneration of its reply.
    ///
    /// The old reply (or replies) linked to the message are removed and
    /// their text is kept in the new placeholder's `previous_replies`. The
    /// placeholder is inserted right after the edited message, so later
    /// turns keep their positions relative to it.
    ///
    /// Returns `Ok(None)` without touching state when the text is blank or a
    /// reply is in flight, and `Err(NotFound)` when `id` does not name a user
    /// message.
    pub fn submit_edit(&mut self, id: MessageId, text: &str) -> Result<Option<PendingReply>> {
        if text.trim().is_empty() || self.guarded("submit edit") {
            return Ok(None);
        }
        self.user_index(id)?;

        let mut previous_replies = Vec::new();
        self.messages.retain(|m| {
            if m.is_bot() && m.parent_id == Some(id) {
                previous_replies.extend(m.previous_replies.iter().cloned());
                previous_replies.push(m.text.clone());
                false
            } else {
                true
            }
        });

        let user_index = self.user_index(id)?;
        for message in &mut self.messages {
            message.is_editing = false;
        }
        let user = &mut self.messages[user_index];
        user.text = text.to_string();
        let backing_id = user.backing_id;

        let mut bot = Message::placeholder(id);
        bot.previous_replies = previous_replies;
        bot.backing_id = backing_id;
        let pending = PendingReply {
            kind: ReplyKind::Edit,
            user_id: id,
            bot_id: bot.id,
            prompt: text.to_string(),
            backing_id,
        };

        tracing::debug!(user_id = %id, bot_id = %bot.id, position = user_index, "regenerating reply");
        self.messages.insert(user_index + 1, bot);
        self.in_flight = Some(pending.bot_id);
        Ok(Some(pending))
    }

    /// Shows `text` as the current content of the pending reply.
    pub fn reveal(&mut self, bot_id: MessageId, text: &str) -> Result<()> {
        self.ensure_in_flight(bot_id)?;
        let bot = self.bot_mut(bot_id)?;
        bot.text.clear();
        bot.text.push_str(text);
        Ok(())
    }

    /// Empties the pending reply so characters can be appended to it.
    pub fn begin_reveal(&mut self, bot_id: MessageId) -> Result<()> {
        self.reveal(bot_id, "")
    }

    /// Appends one character to the pending reply.
    pub fn reveal_char(&mut self, bot_id: MessageId, ch: char) -> Result<()> {
        self.ensure_in_flight(bot_id)?;
        self.bot_mut(bot_id)?.text.push(ch);
        Ok(())
    }

    /// Releases the in-flight guard after the reply has been shown.
    pub fn complete_reply(&mut self, bot_id: MessageId) -> Result<()> {
        self.ensure_in_flight(bot_id)?;
        self.in_flight = None;
        Ok(())
    }

    /// Replaces the pending reply with the error text and releases the guard.
    pub fn fail_reply(&mut self, bot_id: MessageId) -> Result<()> {
        self.ensure_in_flight(bot_id)?;
        self.bot_mut(bot_id)?.text = REPLY_ERROR_TEXT.to_string();
        self.in_flight = None;
        Ok(())
    }

    /// Flips between the current and the superseded reply of a bot message.
    pub fn toggle_previous(&mut self, bot_id: MessageId) -> Result<()> {
        let bot = self.bot_mut(bot_id)?;
        bot.show_previous = !bot.show_previous;
        Ok(())
    }

    /// Records the stored record backing a turn on the user message and its reply.
    pub fn attach_backing_id(&mut self, user_id: MessageId, record: RecordId) -> Result<()> {
        self.user_index(user_id)?;
        for message in &mut self.messages {
            if message.id == user_id || (message.is_bot() && message.parent_id == Some(user_id)) {
                message.backing_id = Some(record);
            }
        }
        Ok(())
    }

    /// Removes every message. Returns `false` when a reply is in flight.
    pub fn clear(&mut self) -> bool {
        if self.guarded("clear") {
            return false;
        }
        self.messages.clear();
        true
    }

    fn guarded(&self, action: &str) -> bool {
        if let Some(bot_id) = self.in_flight {
            tracing::debug!(%bot_id, action, "ignored while a reply is in flight");
            true
        } else {
            false
        }
    }

    fn user_index(&self, id: MessageId) -> Result<usize> {
        self.messages
            .iter()
            .position(|m| m.id == id && m.is_user())
            .ok_or_else(|| ChatGateError::not_found("user message", id.to_string()))
    }

    fn bot_mut(&mut self, id: MessageId) -> Result<&mut Message> {
        self.messages
            .iter_mut()
            .find(|m| m.id == id && m.is_bot())
            .ok_or_else(|| ChatGateError::not_found("bot message", id.to_string()))
    }

    fn ensure_in_flight(&self, bot_id: MessageId) -> Result<()> {
        if self.in_flight == Some(bot_id) {
            Ok(())
        } else {
            Err(ChatGateError::internal(format!(
                "no reply in flight for message {bot_id}"
            )))
        }
    }
}
