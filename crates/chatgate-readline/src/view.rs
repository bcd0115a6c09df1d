//! Terminal rendering of the conversation.

use std::io::{self, Write};

use chatgate_application::ConversationObserver;
use chatgate_core::conversation::{Conversation, Message, MessageId};
use colored::Colorize;

const USER_LABEL: &str = "you";
const BOT_LABEL: &str = "bot";

/// Prints a pending reply as it changes.
///
/// Growing text is appended to the current line; any other change (the
/// placeholder giving way to the first frame, or to the error text) redraws
/// the line.
#[derive(Debug, Default)]
pub struct TerminalView {
    current: Option<MessageId>,
    printed: String,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the line of the reply that was being drawn.
    pub fn finish(&mut self) {
        if self.current.take().is_some() {
            println!();
        }
        self.printed.clear();
    }

    /// Moves `printed` to `text` and returns the bytes that draw the change.
    fn advance(&mut self, text: &str, fresh: bool) -> String {
        if !fresh {
            if let Some(rest) = text.strip_prefix(self.printed.as_str()) {
                let out = rest.to_string();
                self.printed.push_str(rest);
                return out;
            }
        }

        self.printed.clear();
        self.printed.push_str(text);
        if fresh {
            format!("{} {}", bot_prefix(), paint_reply(text))
        } else {
            format!("\r\x1b[2K{} {}", bot_prefix(), paint_reply(text))
        }
    }
}

impl ConversationObserver for TerminalView {
    fn on_change(&mut self, conversation: &Conversation, changed: MessageId) {
        let Some(message) = conversation.get(changed) else {
            return;
        };
        if !message.is_bot() {
            return;
        }

        let fresh = self.current != Some(changed);
        if fresh {
            self.finish();
            self.current = Some(changed);
        }
        let out = self.advance(&message.text, fresh);

        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{out}");
        let _ = stdout.flush();
    }
}

fn bot_prefix() -> String {
    format!("{BOT_LABEL}:").bright_blue().bold().to_string()
}

fn paint_reply(text: &str) -> String {
    if text == chatgate_core::conversation::PLACEHOLDER_TEXT {
        format!("{text}...").bright_black().to_string()
    } else {
        text.to_string()
    }
}

/// Prints the whole conversation, numbering turns for `/edit` and `/prev`.
pub fn render_conversation(conversation: &Conversation) {
    if conversation.is_empty() {
        println!("{}", "No messages yet. Say something!".bright_black());
        return;
    }
    for line in conversation_lines(conversation) {
        println!("{line}");
    }
}

pub fn conversation_lines(conversation: &Conversation) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, user) in conversation.user_messages().enumerate() {
        lines.push(format!(
            "{} {} {}",
            format!("[{}]", index + 1).bright_black(),
            format!("{USER_LABEL}:").green().bold(),
            user.text
        ));
        if let Some(reply) = conversation.reply_to(user.id) {
            lines.push(reply_line(reply));
        }
    }
    lines
}

fn reply_line(reply: &Message) -> String {
    let mut line = format!("    {} {}", bot_prefix(), paint_reply(reply.display_text()));
    if !reply.previous_replies.is_empty() {
        let note = if reply.show_previous {
            "(previous reply)"
        } else {
            "(regenerated)"
        };
        line.push(' ');
        line.push_str(&note.bright_black().italic().to_string());
    }
    line
}
