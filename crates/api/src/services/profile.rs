//! Profile service.
//!
//! Merged account + profile reads and apply-if-provided updates. Username
//! and email changes go through the account row with uniqueness checks;
//! the overlay fields are lazily upserted.

use sqlx::PgPool;

use shopcart_core::{Email, UserId, Username};

use super::ServiceError;
use crate::db::profiles::ProfileRepository;
use crate::db::users::UserRepository;
use crate::models::profile::{ProfileChanges, ProfileView};

/// Profile service.
pub struct ProfileService<'a> {
    users: UserRepository<'a>,
    profiles: ProfileRepository<'a>,
}

impl<'a> ProfileService<'a> {
    /// Create a new profile service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            profiles: ProfileRepository::new(pool),
        }
    }

    /// Get the merged user + profile view.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the user doesn't exist.
    pub async fn get(&self, user_id: UserId) -> Result<ProfileView, ServiceError> {
        self.profiles
            .get_view(user_id)
            .await
            .map_err(ServiceError::entity("user"))
    }

    /// Apply a partial profile update and return the refreshed view.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` for a malformed username or
    /// email and `ServiceError::Conflict` if the new username or email is
    /// taken.
    pub async fn update(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<ProfileView, ServiceError> {
        if changes.touches_account() {
            let username = changes
                .username
                .as_deref()
                .map(Username::parse)
                .transpose()
                .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
            let email = changes
                .email
                .as_deref()
                .map(Email::parse)
                .transpose()
                .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;

            self.users
                .update_account(user_id, username.as_ref(), email.as_ref())
                .await
                .map_err(ServiceError::entity("user"))?;
        }

        if changes.touches_profile() {
            self.profiles.upsert(user_id, &changes).await?;
        }

        self.get(user_id).await
    }
}
