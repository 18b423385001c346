//! User repository for database operations.

use sqlx::PgPool;

use shopcart_core::{Email, UserId, Username};

use super::RepositoryError;
use crate::models::user::User;

const SELECT_USER: &str = "SELECT id, username, email, created_at, updated_at FROM app_user";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Create a new user with username, email and password hash.
    ///
    /// The user row and its password row are inserted in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` naming the colliding field if the
    /// username or email is already registered.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        username: &Username,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO app_user (username, email)
             VALUES ($1, $2)
             RETURNING id, username, email, created_at, updated_at",
        )
        .bind(username.as_str())
        .bind(email.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_account_unique_violation)?;

        sqlx::query("INSERT INTO user_password (user_id, password_hash) VALUES ($1, $2)")
            .bind(user.id.as_i32())
            .bind(password_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    /// Get a user's password hash by email.
    ///
    /// Returns `None` if the user doesn't exist or has no password set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHash>(
            "SELECT u.id, u.username, u.email, u.created_at, u.updated_at, p.password_hash
             FROM app_user u
             LEFT JOIN user_password p ON u.id = p.user_id
             WHERE u.email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.and_then(UserWithHash::into_pair))
    }

    /// Get a user's password hash by ID.
    ///
    /// Returns `None` if the user doesn't exist or has no password set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash_by_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<String>, RepositoryError> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM user_password WHERE user_id = $1",
        )
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(hash)
    }

    /// Replace a user's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no password row.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_password(
        &self,
        user_id: UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE user_password SET password_hash = $2 WHERE user_id = $1")
            .bind(user_id.as_i32())
            .bind(password_hash)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query("UPDATE app_user SET updated_at = now() WHERE id = $1")
            .bind(user_id.as_i32())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Update the account row's username and/or email (apply-if-provided).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` naming the colliding field if the
    /// new username or email is taken.
    pub async fn update_account(
        &self,
        user_id: UserId,
        username: Option<&Username>,
        email: Option<&Email>,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE app_user
             SET username = COALESCE($2, username),
                 email = COALESCE($3, email),
                 updated_at = now()
             WHERE id = $1
             RETURNING id, username, email, created_at, updated_at",
        )
        .bind(user_id.as_i32())
        .bind(username.map(Username::as_str))
        .bind(email.map(Email::as_str))
        .fetch_optional(self.pool)
        .await
        .map_err(map_account_unique_violation)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(user)
    }

    /// Delete a user; ownership cascades to addresses, cart, wishlist and
    /// profile at the schema level.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn delete(&self, user_id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM app_user WHERE id = $1")
            .bind(user_id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Map a unique violation on `app_user` to a `Conflict` naming the field.
fn map_account_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        let message = match db_err.constraint() {
            Some("app_user_username_key") => "username already exists",
            Some("app_user_email_key") => "email already exists",
            _ => "account already exists",
        };
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}

/// Row type for the user + password hash join.
#[derive(sqlx::FromRow)]
struct UserWithHash {
    id: UserId,
    username: Username,
    email: Email,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    password_hash: Option<String>,
}

impl UserWithHash {
    fn into_pair(self) -> Option<(User, String)> {
        let hash = self.password_hash?;
        Some((
            User {
                id: self.id,
                username: self.username,
                email: self.email,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            hash,
        ))
    }
}
