//! Address domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shopcart_core::{AddressId, UserId};

/// A user's shipping/billing address.
///
/// Per user, at most one address has `is_default = true`; when a user has
/// any addresses, exactly one does.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Address {
    /// Unique address ID.
    pub id: AddressId,
    /// Owning user.
    pub user_id: UserId,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    /// Whether this is the user's default address.
    pub is_default: bool,
    /// When the address was created.
    pub created_at: DateTime<Utc>,
}

/// Payload for creating an address.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    /// Requested default flag. Ignored for a user's first address, which
    /// is always made the default.
    #[serde(default)]
    pub is_default: bool,
}

/// Partial update for an address; absent fields are left untouched.
///
/// `is_default: Some(false)` is ignored — a default is only ever moved by
/// electing another address, never removed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressChanges {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub is_default: Option<bool>,
}

impl AddressChanges {
    /// Whether the update asks to make this address the default.
    #[must_use]
    pub fn requests_default(&self) -> bool {
        self.is_default == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_default() {
        assert!(
            AddressChanges {
                is_default: Some(true),
                ..AddressChanges::default()
            }
            .requests_default()
        );
        assert!(
            !AddressChanges {
                is_default: Some(false),
                ..AddressChanges::default()
            }
            .requests_default()
        );
        assert!(!AddressChanges::default().requests_default());
    }
}
