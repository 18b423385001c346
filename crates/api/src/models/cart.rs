//! Cart domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shopcart_core::{CartId, CartItemId, ProductId, UserId};

/// A user's cart row.
///
/// One per user, created lazily on first access.
#[derive(Debug, Clone, FromRow)]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Owning user.
    pub user_id: UserId,
    /// When the cart was created.
    pub created_at: DateTime<Utc>,
    /// When the cart's contents last changed.
    pub updated_at: DateTime<Utc>,
}

/// A cart line item joined with its product's name.
///
/// `unit_price` is the snapshot taken when the product was first added;
/// later catalog price changes do not affect it.
#[derive(Debug, Clone, FromRow)]
pub struct CartItemRow {
    /// Unique item ID.
    pub id: CartItemId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Product name at read time (display only).
    pub product_name: String,
    /// Line quantity, always >= 1.
    pub quantity: i32,
    /// Price snapshot from add-time.
    pub unit_price: Decimal,
}

/// A cart line item as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemDto {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    /// `unit_price * quantity`, computed from the snapshot only.
    pub line_total: Decimal,
}

impl From<CartItemRow> for CartItemDto {
    fn from(row: CartItemRow) -> Self {
        let line_total = row.unit_price * Decimal::from(row.quantity);
        Self {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
            line_total,
        }
    }
}

/// The full cart aggregate returned by every cart endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CartDto {
    pub id: CartId,
    pub items: Vec<CartItemDto>,
    /// Sum of all line totals.
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartDto {
    /// Assemble the aggregate from the cart row and its items.
    #[must_use]
    pub fn assemble(cart: &Cart, rows: Vec<CartItemRow>) -> Self {
        let items: Vec<CartItemDto> = rows.into_iter().map(CartItemDto::from).collect();
        let total = items.iter().map(|i| i.line_total).sum();
        Self {
            id: cart.id,
            items,
            total,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

/// Payload for adding a product to the cart.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCartItem {
    pub product_id: ProductId,
    /// Requested quantity; validated to be >= 1 before any state change.
    pub quantity: i32,
}

/// Payload for replacing a line item's quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCartItem {
    /// New quantity; replaces the current value, it is not added to it.
    pub quantity: i32,
}
