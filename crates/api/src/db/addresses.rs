//! Address repository.
//!
//! Maintains the single-default invariant: for a given user, the number of
//! addresses with `is_default = true` is exactly 0 (no addresses) or
//! exactly 1 (one or more addresses).
//!
//! Every mutation runs in a transaction that first takes a row lock on the
//! owning `app_user` row, serializing address writes per user across all
//! server instances. The partial unique index
//! `address_single_default_idx` rejects any double-default at the storage
//! layer even if a future code path forgets the lock.

use sqlx::{PgPool, Postgres, Transaction};

use shopcart_core::{AddressId, UserId};

use super::RepositoryError;
use crate::models::address::{Address, AddressChanges, NewAddress};

const SELECT_ADDRESS: &str = "SELECT id, user_id, street, city, state, zip_code, country, \
                              is_default, created_at FROM address";

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's addresses, oldest first.
    ///
    /// The ordering matches the default-promotion rule in [`Self::delete`],
    /// so the first listed address is the one that would be promoted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(&format!(
            "{SELECT_ADDRESS} WHERE user_id = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    /// Find the user's default address, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_default(&self, user_id: UserId) -> Result<Option<Address>, RepositoryError> {
        let address = sqlx::query_as::<_, Address>(&format!(
            "{SELECT_ADDRESS} WHERE user_id = $1 AND is_default"
        ))
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(address)
    }

    /// Create an address for a user.
    ///
    /// The user's first address is forced to default regardless of the
    /// requested flag; otherwise, requesting default unsets the previous
    /// default inside the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        new: &NewAddress,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        lock_user(&mut tx, user_id).await?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM address WHERE user_id = $1",
        )
        .bind(user_id.as_i32())
        .fetch_one(&mut *tx)
        .await?;

        // First address is always the default
        let is_default = existing == 0 || new.is_default;

        if is_default && existing > 0 {
            unset_default(&mut tx, user_id, None).await?;
        }

        let address = sqlx::query_as::<_, Address>(
            "INSERT INTO address (user_id, street, city, state, zip_code, country, is_default)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, user_id, street, city, state, zip_code, country, is_default, created_at",
        )
        .bind(user_id.as_i32())
        .bind(&new.street)
        .bind(&new.city)
        .bind(&new.state)
        .bind(&new.zip_code)
        .bind(&new.country)
        .bind(is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(address)
    }

    /// Apply a partial update to an address owned by the user.
    ///
    /// Absent fields are left untouched. `is_default = Some(true)` runs
    /// the unset-then-set sequence; `Some(false)` is ignored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no address with that id
    /// belongs to that user.
    pub async fn update(
        &self,
        user_id: UserId,
        address_id: AddressId,
        changes: &AddressChanges,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        lock_user(&mut tx, user_id).await?;

        let owned = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM address WHERE id = $1 AND user_id = $2",
        )
        .bind(address_id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(&mut *tx)
        .await?;

        if owned.is_none() {
            return Err(RepositoryError::NotFound);
        }

        let make_default = changes.requests_default();
        if make_default {
            // Clear the current default before this row becomes it
            unset_default(&mut tx, user_id, Some(address_id)).await?;
        }

        let address = sqlx::query_as::<_, Address>(
            "UPDATE address
             SET street = COALESCE($3, street),
                 city = COALESCE($4, city),
                 state = COALESCE($5, state),
                 zip_code = COALESCE($6, zip_code),
                 country = COALESCE($7, country),
                 is_default = (is_default OR $8)
             WHERE id = $1 AND user_id = $2
             RETURNING id, user_id, street, city, state, zip_code, country, is_default, created_at",
        )
        .bind(address_id.as_i32())
        .bind(user_id.as_i32())
        .bind(changes.street.as_deref())
        .bind(changes.city.as_deref())
        .bind(changes.state.as_deref())
        .bind(changes.zip_code.as_deref())
        .bind(changes.country.as_deref())
        .bind(make_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(address)
    }

    /// Delete an address owned by the user.
    ///
    /// If the deleted address was the default and other addresses remain,
    /// the remaining address with the lowest `(created_at, id)` is
    /// promoted so the invariant keeps holding.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no address with that id
    /// belongs to that user.
    pub async fn delete(
        &self,
        user_id: UserId,
        address_id: AddressId,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        lock_user(&mut tx, user_id).await?;

        let was_default = sqlx::query_scalar::<_, bool>(
            "DELETE FROM address WHERE id = $1 AND user_id = $2 RETURNING is_default",
        )
        .bind(address_id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        if was_default {
            sqlx::query(
                "UPDATE address SET is_default = TRUE
                 WHERE id = (
                     SELECT id FROM address
                     WHERE user_id = $1
                     ORDER BY created_at ASC, id ASC
                     LIMIT 1
                 )",
            )
            .bind(user_id.as_i32())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

/// Lock the owning user row for the duration of the transaction.
///
/// Serializes concurrent address mutations for the same user; two requests
/// that both want to move the default flag queue up here instead of both
/// passing the "current default" lookup.
async fn lock_user(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
) -> Result<(), RepositoryError> {
    let locked = sqlx::query_scalar::<_, i32>("SELECT id FROM app_user WHERE id = $1 FOR UPDATE")
        .bind(user_id.as_i32())
        .fetch_optional(&mut **tx)
        .await?;

    if locked.is_none() {
        return Err(RepositoryError::NotFound);
    }

    Ok(())
}

/// Clear the current default address, optionally keeping one id untouched.
async fn unset_default(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
    except: Option<AddressId>,
) -> Result<(), RepositoryError> {
    sqlx::query(
        "UPDATE address SET is_default = FALSE
         WHERE user_id = $1 AND is_default AND ($2::int4 IS NULL OR id <> $2)",
    )
    .bind(user_id.as_i32())
    .bind(except.map(|id| id.as_i32()))
    .execute(&mut **tx)
    .await?;

    Ok(())
}
