//! Application layer for chatgate.
//!
//! Use cases that drive the domain types in `chatgate-core` through the
//! collaborator ports. Front ends hold one of these per screen.

pub mod auth_usecase;
pub mod chat_controller;
pub mod observer;

#[cfg(test)]
mod test_support;

pub use auth_usecase::AuthUseCase;
pub use chat_controller::{ChatController, ReplyOutcome};
pub use observer::{ConversationObserver, NoopObserver};
