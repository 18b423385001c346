//! Wishlist repository.
//!
//! The `wishlist_product` primary key is the duplicate-rejection
//! constraint: inserting an already-present product raises a unique
//! violation which is reported as `Conflict`, never silently merged.

use sqlx::PgPool;

use shopcart_core::{ProductId, UserId, WishListId};

use super::RepositoryError;
use crate::models::catalog::Product;
use crate::models::wishlist::WishList;

const SELECT_WISHLIST: &str = "SELECT id, user_id, created_at FROM wishlist";

/// Repository for wishlist database operations.
pub struct WishListRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishListRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user's wishlist, creating an empty one on first access.
    ///
    /// Same conflict-tolerant creation as the cart: `INSERT .. ON CONFLICT
    /// DO NOTHING` + re-fetch.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<WishList, RepositoryError> {
        if let Some(wishlist) = self.find_by_user(user_id).await? {
            return Ok(wishlist);
        }

        let inserted = sqlx::query_as::<_, WishList>(
            "INSERT INTO wishlist (user_id) VALUES ($1)
             ON CONFLICT (user_id) DO NOTHING
             RETURNING id, user_id, created_at",
        )
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        match inserted {
            Some(wishlist) => Ok(wishlist),
            None => self.find_by_user(user_id).await?.ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "wishlist for user {user_id} vanished after insert conflict"
                ))
            }),
        }
    }

    /// Find the user's wishlist without creating one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<WishList>, RepositoryError> {
        let wishlist = sqlx::query_as::<_, WishList>(&format!(
            "{SELECT_WISHLIST} WHERE user_id = $1"
        ))
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(wishlist)
    }

    /// List the wishlist's products in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn products(&self, wishlist_id: WishListId) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT p.id, p.name, p.description, p.price, p.category_id
             FROM wishlist_product wp
             JOIN product p ON p.id = wp.product_id
             WHERE wp.wishlist_id = $1
             ORDER BY wp.added_at ASC, p.id ASC",
        )
        .bind(wishlist_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Add a product to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product is already
    /// present. Returns `RepositoryError::NotFound` if the product was
    /// deleted concurrently.
    pub async fn add(
        &self,
        wishlist_id: WishListId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO wishlist_product (wishlist_id, product_id) VALUES ($1, $2)")
            .bind(wishlist_id.as_i32())
            .bind(product_id.as_i32())
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.is_unique_violation() {
                        return RepositoryError::Conflict(
                            "product already in wishlist".to_owned(),
                        );
                    }
                    if db_err.is_foreign_key_violation() {
                        return RepositoryError::NotFound;
                    }
                }
                RepositoryError::Database(e)
            })?;

        Ok(())
    }

    /// Remove a product from the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product is not currently
    /// in the set.
    pub async fn remove(
        &self,
        wishlist_id: WishListId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("DELETE FROM wishlist_product WHERE wishlist_id = $1 AND product_id = $2")
                .bind(wishlist_id.as_i32())
                .bind(product_id.as_i32())
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove every product from the wishlist.
    ///
    /// Clearing an already-empty wishlist is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, wishlist_id: WishListId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM wishlist_product WHERE wishlist_id = $1")
            .bind(wishlist_id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
