//! Change notifications from the controller to the view.

use chatgate_core::conversation::{Conversation, MessageId};

/// Receives every state change the controller makes while a reply is
/// pending, including each reveal frame.
pub trait ConversationObserver: Send {
    fn on_change(&mut self, conversation: &Conversation, changed: MessageId);
}

/// Observer that ignores every change.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ConversationObserver for NoopObserver {
    fn on_change(&mut self, _conversation: &Conversation, _changed: MessageId) {}
}

impl<F> ConversationObserver for F
where
    F: FnMut(&Conversation, MessageId) + Send,
{
    fn on_change(&mut self, conversation: &Conversation, changed: MessageId) {
        self(conversation, changed)
    }
}
