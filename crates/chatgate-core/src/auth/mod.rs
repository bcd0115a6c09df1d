//! Auth domain module.
//!
//! # Module Structure
//!
//! - `model`: Form state (`AuthForm`, `AuthMode`) and rejection reasons (`AuthError`)
//! - `service`: Collaborator trait (`AuthService`)

mod model;
mod service;

pub use model::{AuthError, AuthForm, AuthMode};
pub use service::AuthService;
