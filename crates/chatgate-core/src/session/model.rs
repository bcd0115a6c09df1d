//! Session domain model.

use serde::{Deserialize, Serialize};

/// The authenticated identity.
///
/// A session is nothing more than the email the user signed in with. It has
/// no expiry and is kept until the user logs out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
}

impl Session {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}
