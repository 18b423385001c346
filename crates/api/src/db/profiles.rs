//! Profile repository.
//!
//! The profile row is a lazily-created overlay on the account row; the
//! upsert applies only the provided fields, so a partial update never
//! wipes the rest.

use sqlx::PgPool;

use shopcart_core::UserId;

use super::RepositoryError;
use crate::models::profile::{ProfileChanges, ProfileView};

/// Repository for profile database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the merged user + profile view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn get_view(&self, user_id: UserId) -> Result<ProfileView, RepositoryError> {
        let view = sqlx::query_as::<_, ProfileView>(
            "SELECT u.id AS user_id, u.username, u.email,
                    p.first_name, p.last_name, p.phone, p.avatar, p.bio,
                    u.created_at, u.updated_at
             FROM app_user u
             LEFT JOIN profile p ON p.user_id = u.id
             WHERE u.id = $1",
        )
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(view)
    }

    /// Create or update the profile overlay, applying only provided fields.
    ///
    /// Also stamps the account row's `updated_at` in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn upsert(
        &self,
        user_id: UserId,
        changes: &ProfileChanges,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO profile (user_id, first_name, last_name, phone, avatar, bio)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id) DO UPDATE SET
                 first_name = COALESCE(EXCLUDED.first_name, profile.first_name),
                 last_name = COALESCE(EXCLUDED.last_name, profile.last_name),
                 phone = COALESCE(EXCLUDED.phone, profile.phone),
                 avatar = COALESCE(EXCLUDED.avatar, profile.avatar),
                 bio = COALESCE(EXCLUDED.bio, profile.bio)",
        )
        .bind(user_id.as_i32())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.phone.as_deref())
        .bind(changes.avatar.as_deref())
        .bind(changes.bio.as_deref())
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE app_user SET updated_at = now() WHERE id = $1")
            .bind(user_id.as_i32())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
