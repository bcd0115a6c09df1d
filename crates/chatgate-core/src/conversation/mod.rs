//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: Message types (`Message`, `MessageId`, `Sender`) and fixed texts
//! - `model`: The ordered conversation and its update functions (`Conversation`)
//! - `reveal`: Character-by-character disclosure of a reply (`RevealSequence`)
//!
//! # Usage
//!
//! ```
//! use chatgate_core::conversation::{Conversation, RevealSequence};
//!
//! let mut conversation = Conversation::new();
//! let pending = conversation.send("hi").expect("accepted");
//! conversation.begin_reveal(pending.bot_id).unwrap();
//! for ch in RevealSequence::new("hello") {
//!     conversation.reveal_char(pending.bot_id, ch).unwrap();
//! }
//! conversation.complete_reply(pending.bot_id).unwrap();
//! assert_eq!(conversation.messages()[1].text, "hello");
//! ```

mod message;
mod model;
mod reveal;

pub use message::{
    EMPTY_REPLY_TEXT, Message, MessageId, PLACEHOLDER_TEXT, REPLY_ERROR_TEXT, Sender,
};
pub use model::{Conversation, PendingReply, ReplyKind};
pub use reveal::RevealSequence;
