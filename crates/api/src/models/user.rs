//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use shopcart_core::{Email, UserId, Username};

/// A registered user.
///
/// The password hash is never part of this type; it lives in a separate
/// table and is only surfaced by the dedicated credential lookups.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login/display name.
    pub username: Username,
    /// Unique email address.
    pub email: Email,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
