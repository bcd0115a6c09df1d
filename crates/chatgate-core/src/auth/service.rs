//! Auth collaborator trait.

use crate::error::Result;
use async_trait::async_trait;

/// The credential authority the auth form talks to.
///
/// Implementations map collaborator rejections onto
/// [`AuthError`](super::AuthError) wrapped in
/// [`ChatGateError::Auth`](crate::ChatGateError::Auth) so the form can show
/// them inline.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a new credential record.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Record created
    /// - `Err(ChatGateError::Auth(UserAlreadyExists))`: Email already taken
    /// - `Err(_)`: Any other failure
    async fn register(&self, email: &str, password: &str) -> Result<()>;

    /// Checks credentials and returns the authenticated email.
    ///
    /// # Returns
    ///
    /// - `Ok(email)`: Credentials accepted
    /// - `Err(ChatGateError::Auth(InvalidCredentials))`: Rejected
    /// - `Err(_)`: Any other failure
    async fn login(&self, email: &str, password: &str) -> Result<String>;
}
