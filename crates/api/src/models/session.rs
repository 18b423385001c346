//! Session state types.

use serde::{Deserialize, Serialize};

use shopcart_core::{Email, UserId, Username};

use super::user::User;

/// Session keys used to store state in tower-sessions.
pub mod session_keys {
    /// The currently authenticated user.
    pub const CURRENT_USER: &str = "current_user";
}

/// The authenticated user resolved from the session.
///
/// This is the identity every user-scoped handler receives; handlers never
/// trust ids from the request body or path for authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Unique user ID.
    pub id: UserId,
    /// Login/display name.
    pub username: Username,
    /// Email address.
    pub email: Email,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
