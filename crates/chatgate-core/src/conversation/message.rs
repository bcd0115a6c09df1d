//! Conversation message types.

use crate::history::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Text of a bot message while its reply is outstanding.
pub const PLACEHOLDER_TEXT: &str = "typing";

/// Text a pending reply is replaced with when the chat call fails.
pub const REPLY_ERROR_TEXT: &str = "Error in response.";

/// Text revealed instead of an empty service response.
pub const EMPTY_REPLY_TEXT: &str = "Error in response";

/// Opaque, stable identifier of a message.
///
/// Every message gets one regardless of where the conversation was loaded
/// from; backend identifiers live separately in [`Message::backing_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single turn in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    /// For bot messages, the user message this one answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<MessageId>,
    #[serde(default)]
    pub is_editing: bool,
    /// Identifier of the stored record backing this turn, once persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_id: Option<RecordId>,
    /// Replies superseded by edits, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previous_replies: Vec<String>,
    #[serde(default)]
    pub show_previous: bool,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Creates a user message with a fresh identifier.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::User,
            text: text.into(),
            parent_id: None,
            is_editing: false,
            backing_id: None,
            previous_replies: Vec::new(),
            show_previous: false,
            sent_at: Utc::now(),
        }
    }

    /// Creates a bot message answering `parent`.
    pub fn bot(parent: MessageId, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::Bot,
            text: text.into(),
            parent_id: Some(parent),
            is_editing: false,
            backing_id: None,
            previous_replies: Vec::new(),
            show_previous: false,
            sent_at: Utc::now(),
        }
    }

    /// Creates the bot placeholder shown while a reply is outstanding.
    pub fn placeholder(parent: MessageId) -> Self {
        Self::bot(parent, PLACEHOLDER_TEXT)
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }

    pub fn is_placeholder(&self) -> bool {
        self.is_bot() && self.text == PLACEHOLDER_TEXT
    }

    /// Text to render: the latest superseded reply when the toggle is on.
    pub fn display_text(&self) -> &str {
        if self.show_previous {
            if let Some(previous) = self.previous_replies.last() {
                return previous;
            }
        }
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_are_unique() {
        assert_ne!(MessageId::new(), MessageId::new());
    }

    #[test]
    fn test_placeholder_links_parent() {
        let user = Message::user("hi");
        let bot = Message::placeholder(user.id);
        assert!(bot.is_placeholder());
        assert_eq!(bot.parent_id, Some(user.id));
        assert!(!user.is_placeholder());
    }

    #[test]
    fn test_display_text_toggles_previous() {
        let user = Message::user("hi");
        let mut bot = Message::bot(user.id, "new");
        assert_eq!(bot.display_text(), "new");

        bot.show_previous = true;
        assert_eq!(bot.display_text(), "new", "nothing superseded yet");

        bot.previous_replies = vec!["oldest".into(), "old".into()];
        assert_eq!(bot.display_text(), "old");

        bot.show_previous = false;
        assert_eq!(bot.display_text(), "new");
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
    }
}
