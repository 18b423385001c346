//! Cart service.
//!
//! Validates input, resolves products through the catalog, and returns the
//! full cart aggregate from every operation. Line totals always come from
//! the stored price snapshot, never from a live product read.

use sqlx::PgPool;

use shopcart_core::{CartItemId, ProductId, Quantity, UserId};

use super::ServiceError;
use crate::db::carts::CartRepository;
use crate::db::catalog::CatalogRepository;
use crate::models::cart::{Cart, CartDto};

/// Cart service.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
    catalog: CatalogRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            carts: CartRepository::new(pool),
            catalog: CatalogRepository::new(pool),
        }
    }

    /// Get the user's cart, creating an empty one on first access.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if a query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<CartDto, ServiceError> {
        let cart = self.carts.get_or_create(user_id).await?;
        self.assemble(&cart).await
    }

    /// Add a product to the cart, merging quantities for a product that is
    /// already present.
    ///
    /// The unit price is snapshotted from the product's current price at
    /// add-time; it is not re-read later.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` for a non-positive quantity
    /// (before any state change) and `ServiceError::NotFound` for an
    /// unknown product.
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartDto, ServiceError> {
        let quantity = parse_quantity(quantity)?;

        let product = self
            .catalog
            .get_product(product_id)
            .await?
            .ok_or(ServiceError::NotFound("product"))?;

        let cart = self.carts.get_or_create(user_id).await?;

        self.carts
            .add_item(cart.id, product.id, quantity, product.price)
            .await
            .map_err(ServiceError::entity("product"))?;

        // Re-read for the fresh updated_at stamp
        let cart = self.carts.get_by_id(cart.id).await?;
        self.assemble(&cart).await
    }

    /// Replace a line item's quantity.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` for a non-positive quantity and
    /// `ServiceError::NotFound` if the item doesn't exist or belongs to
    /// another user's cart.
    pub async fn update_item_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<CartDto, ServiceError> {
        let quantity = parse_quantity(quantity)?;

        let cart_id = self
            .carts
            .update_item_quantity(user_id, item_id, quantity)
            .await
            .map_err(ServiceError::entity("cart item"))?;

        let cart = self.carts.get_by_id(cart_id).await?;
        self.assemble(&cart).await
    }

    /// Remove a line item from the cart.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the item doesn't exist or
    /// belongs to another user's cart.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<CartDto, ServiceError> {
        let cart_id = self
            .carts
            .remove_item(user_id, item_id)
            .await
            .map_err(ServiceError::entity("cart item"))?;

        let cart = self.carts.get_by_id(cart_id).await?;
        self.assemble(&cart).await
    }

    async fn assemble(&self, cart: &Cart) -> Result<CartDto, ServiceError> {
        let items = self.carts.items(cart.id).await?;
        Ok(CartDto::assemble(cart, items))
    }
}

fn parse_quantity(quantity: i32) -> Result<Quantity, ServiceError> {
    Quantity::new(quantity).map_err(|e| ServiceError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_rejects_non_positive() {
        assert!(matches!(
            parse_quantity(0),
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_quantity(-5),
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_quantity_accepts_positive() {
        assert!(parse_quantity(1).is_ok());
        assert!(parse_quantity(i32::MAX).is_ok());
    }
}
