//! Auth form domain model.
//!
//! The login and register screens share one form; the mode decides which
//! collaborator call the submit goes to.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which action the shared form performs on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    /// Title shown above the form.
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Register",
        }
    }

    /// Label of the submit action.
    pub fn submit_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Sign in",
            AuthMode::Register => "Register and sign in",
        }
    }

    /// Hint pointing at the other mode.
    pub fn switch_hint(&self) -> &'static str {
        match self {
            AuthMode::Login => "No account yet? Type /register",
            AuthMode::Register => "Already have an account? Type /login",
        }
    }
}

/// Reasons a login or registration is rejected.
///
/// The display strings are shown verbatim under the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("user already exists")]
    UserAlreadyExists,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("registration failed: {0}")]
    RegistrationFailed(String),

    #[error("login failed: {0}")]
    LoginFailed(String),
}

/// State of the auth form.
///
/// Email and password are free text; nothing is validated locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    /// Inline error from the last failed submit.
    pub error: Option<String>,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Switches between login and register and clears the inline error.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.error = None;
    }

    /// Selects a mode explicitly; the inline error is cleared only when the
    /// mode actually changes.
    pub fn set_mode(&mut self, mode: AuthMode) {
        if self.mode != mode {
            self.toggle_mode();
        }
    }

    pub fn fail(&mut self, error: &AuthError) {
        self.error = Some(error.to_string());
    }
}
