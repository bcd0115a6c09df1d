//! Auth gate use case.
//!
//! Drives the shared login/register form: submits it to the auth
//! collaborator and records the session marker on success.

use chatgate_core::Result;
use chatgate_core::auth::{AuthForm, AuthMode, AuthService};
use chatgate_core::session::{Session, SessionStore};
use std::sync::Arc;

pub struct AuthUseCase {
    auth: Arc<dyn AuthService>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthUseCase {
    pub fn new(auth: Arc<dyn AuthService>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { auth, sessions }
    }

    /// Returns the stored session, letting the caller skip the auth screen.
    pub async fn restore(&self) -> Result<Option<Session>> {
        let session = self.sessions.load().await?;
        if let Some(session) = &session {
            tracing::info!(email = %session.email, "restored session");
        }
        Ok(session)
    }

    /// Submits the form in its current mode.
    ///
    /// On success the session is stored and returned, and the form error is
    /// cleared. When the collaborator rejects the credentials the form error
    /// is set, no session change happens and `Ok(None)` is returned. Other
    /// failures (the session file cannot be written) are returned as errors.
    pub async fn submit(&self, form: &mut AuthForm) -> Result<Option<Session>> {
        let outcome = match form.mode {
            AuthMode::Login => self.auth.login(&form.email, &form.password).await,
            AuthMode::Register => self
                .auth
                .register(&form.email, &form.password)
                .await
                .map(|()| form.email.clone()),
        };

        let email = match outcome {
            Ok(email) => email,
            Err(chatgate_core::ChatGateError::Auth(error)) => {
                tracing::info!(email = %form.email, mode = ?form.mode, %error, "auth rejected");
                form.fail(&error);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let session = Session::new(email);
        self.sessions.save(&session).await?;
        form.error = None;
        form.password.clear();
        tracing::info!(email = %session.email, mode = ?form.mode, "session established");
        Ok(Some(session))
    }

    /// Removes the session marker.
    pub async fn logout(&self) -> Result<()> {
        self.sessions.clear().await
    }
}
