//! Profile domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shopcart_core::{Email, UserId, Username};

/// Merged user + profile view.
///
/// The profile row is an optional overlay; its fields are null until the
/// user fills them in.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileView {
    pub user_id: UserId,
    pub username: Username,
    pub email: Email,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileChanges {
    /// New username; checked for uniqueness.
    pub username: Option<String>,
    /// New email; checked for uniqueness.
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl ProfileChanges {
    /// Whether the update touches the account row (username/email).
    #[must_use]
    pub const fn touches_account(&self) -> bool {
        self.username.is_some() || self.email.is_some()
    }

    /// Whether the update touches the profile overlay row.
    #[must_use]
    pub const fn touches_profile(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.phone.is_some()
            || self.avatar.is_some()
            || self.bio.is_some()
    }
}

/// Payload for changing the account password.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touches_account() {
        let changes = ProfileChanges {
            username: Some("alice".to_owned()),
            ..ProfileChanges::default()
        };
        assert!(changes.touches_account());
        assert!(!changes.touches_profile());
    }

    #[test]
    fn test_touches_profile() {
        let changes = ProfileChanges {
            bio: Some("hello".to_owned()),
            ..ProfileChanges::default()
        };
        assert!(changes.touches_profile());
        assert!(!changes.touches_account());
    }
}
