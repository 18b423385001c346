//! Wishlist domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shopcart_core::{ProductId, UserId, WishListId};

use super::catalog::Product;

/// A user's wishlist row.
///
/// One per user, created lazily on first access.
#[derive(Debug, Clone, FromRow)]
pub struct WishList {
    /// Unique wishlist ID.
    pub id: WishListId,
    /// Owning user.
    pub user_id: UserId,
    /// When the wishlist was created.
    pub created_at: DateTime<Utc>,
}

/// The full wishlist aggregate returned by wishlist endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct WishListDto {
    pub id: WishListId,
    /// Products in the set, in the order they were added.
    pub products: Vec<Product>,
    pub created_at: DateTime<Utc>,
}

impl WishListDto {
    /// Assemble the aggregate from the wishlist row and its products.
    #[must_use]
    pub fn assemble(wishlist: &WishList, products: Vec<Product>) -> Self {
        Self {
            id: wishlist.id,
            products,
            created_at: wishlist.created_at,
        }
    }
}

/// Payload for adding a product to the wishlist.
#[derive(Debug, Clone, Deserialize)]
pub struct AddWishListProduct {
    pub product_id: ProductId,
}
