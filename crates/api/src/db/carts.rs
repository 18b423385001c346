//! Cart repository.
//!
//! Invariants maintained here:
//! - one cart per user (`cart_user_id_key`, get-or-create re-fetches on
//!   conflict instead of erroring);
//! - at most one line item per (cart, product)
//!   (`cart_item_cart_product_key`, add merges quantities via upsert);
//! - the price snapshot taken at first add is never overwritten;
//! - every content mutation touches `cart.updated_at` in the same
//!   transaction.
//!
//! Item-level operations enforce ownership by joining item → cart → user
//! inside the UPDATE/DELETE statement itself, so there is no gap between
//! the ownership check and the write.

use rust_decimal::Decimal;
use sqlx::PgPool;

use shopcart_core::{CartId, CartItemId, ProductId, Quantity, UserId};

use super::RepositoryError;
use crate::models::cart::{Cart, CartItemRow};

const SELECT_CART: &str = "SELECT id, user_id, created_at, updated_at FROM cart";

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user's cart, creating an empty one on first access.
    ///
    /// Uses `INSERT .. ON CONFLICT DO NOTHING` + re-fetch so two concurrent
    /// first accesses converge on the same row instead of erroring or
    /// creating duplicates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        if let Some(cart) = self.find_by_user(user_id).await? {
            return Ok(cart);
        }

        let inserted = sqlx::query_as::<_, Cart>(
            "INSERT INTO cart (user_id) VALUES ($1)
             ON CONFLICT (user_id) DO NOTHING
             RETURNING id, user_id, created_at, updated_at",
        )
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        match inserted {
            Some(cart) => Ok(cart),
            // Lost the creation race; the winner's row is there to fetch.
            None => self
                .find_by_user(user_id)
                .await?
                .ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "cart for user {user_id} vanished after insert conflict"
                    ))
                }),
        }
    }

    /// Find the user's cart without creating one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_user(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let cart = sqlx::query_as::<_, Cart>(&format!("{SELECT_CART} WHERE user_id = $1"))
            .bind(user_id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        Ok(cart)
    }

    /// Get a cart by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart doesn't exist.
    pub async fn get_by_id(&self, cart_id: CartId) -> Result<Cart, RepositoryError> {
        let cart = sqlx::query_as::<_, Cart>(&format!("{SELECT_CART} WHERE id = $1"))
            .bind(cart_id.as_i32())
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(cart)
    }

    /// List a cart's line items joined with product names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, cart_id: CartId) -> Result<Vec<CartItemRow>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItemRow>(
            "SELECT ci.id, ci.product_id, p.name AS product_name, ci.quantity, ci.unit_price
             FROM cart_item ci
             JOIN product p ON p.id = ci.product_id
             WHERE ci.cart_id = $1
             ORDER BY ci.id ASC",
        )
        .bind(cart_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Add a product to the cart, merging into an existing line item.
    ///
    /// If a line for this product already exists its quantity is increased
    /// by `quantity` and its price snapshot is left as-is; otherwise a new
    /// line is created with `unit_price` as the snapshot. The cart's
    /// `updated_at` is touched in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product was deleted
    /// concurrently. Returns `RepositoryError::Database` for other errors.
    pub async fn add_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: Quantity,
        unit_price: Decimal,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO cart_item (cart_id, product_id, quantity, unit_price)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (cart_id, product_id)
             DO UPDATE SET quantity = cart_item.quantity + EXCLUDED.quantity",
        )
        .bind(cart_id.as_i32())
        .bind(product_id.as_i32())
        .bind(quantity.as_i32())
        .bind(unit_price)
        .execute(&mut *tx)
        .await
        .map_err(map_product_fk_violation)?;

        touch_cart(&mut tx, cart_id).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Replace a line item's quantity.
    ///
    /// The UPDATE joins through the cart to its owning user, so an item id
    /// belonging to another user's cart affects zero rows and reports
    /// `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist or is
    /// not owned by this user.
    pub async fn update_item_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: Quantity,
    ) -> Result<CartId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let cart_id = sqlx::query_scalar::<_, CartId>(
            "UPDATE cart_item SET quantity = $3
             FROM cart
             WHERE cart_item.id = $1
               AND cart.id = cart_item.cart_id
               AND cart.user_id = $2
             RETURNING cart_item.cart_id",
        )
        .bind(item_id.as_i32())
        .bind(user_id.as_i32())
        .bind(quantity.as_i32())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        touch_cart(&mut tx, cart_id).await?;

        tx.commit().await?;

        Ok(cart_id)
    }

    /// Remove a line item, deleting its backing row.
    ///
    /// Same joined ownership rule as [`Self::update_item_quantity`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist or is
    /// not owned by this user.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<CartId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let cart_id = sqlx::query_scalar::<_, CartId>(
            "DELETE FROM cart_item
             USING cart
             WHERE cart_item.id = $1
               AND cart.id = cart_item.cart_id
               AND cart.user_id = $2
             RETURNING cart_item.cart_id",
        )
        .bind(item_id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        touch_cart(&mut tx, cart_id).await?;

        tx.commit().await?;

        Ok(cart_id)
    }
}

/// Stamp the cart's last-modified time inside the caller's transaction.
async fn touch_cart(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    cart_id: CartId,
) -> Result<(), RepositoryError> {
    sqlx::query("UPDATE cart SET updated_at = now() WHERE id = $1")
        .bind(cart_id.as_i32())
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Map a foreign-key violation on `product_id` to `NotFound`.
fn map_product_fk_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::NotFound;
    }
    RepositoryError::Database(e)
}
