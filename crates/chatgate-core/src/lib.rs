//! Domain layer of the chatgate client.
//!
//! Holds the conversation state and its reconciliation rules, the reveal
//! sequence, the auth form, and the traits through which the application
//! layer reaches storage and the remote collaborator.

pub mod auth;
pub mod chat;
pub mod config;
pub mod conversation;
pub mod error;
pub mod history;
pub mod session;

// Re-export common error type
pub use error::{ChatGateError, Result};
