//! Wishlist service.
//!
//! A duplicate-free product set per user: adding an already-present
//! product is an explicit Conflict, removing an absent one is NotFound,
//! and clearing requires the wishlist to already exist.

use sqlx::PgPool;

use shopcart_core::{ProductId, UserId};

use super::ServiceError;
use crate::db::catalog::CatalogRepository;
use crate::db::wishlists::WishListRepository;
use crate::models::wishlist::{WishList, WishListDto};

/// Wishlist service.
pub struct WishListService<'a> {
    wishlists: WishListRepository<'a>,
    catalog: CatalogRepository<'a>,
}

impl<'a> WishListService<'a> {
    /// Create a new wishlist service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            wishlists: WishListRepository::new(pool),
            catalog: CatalogRepository::new(pool),
        }
    }

    /// Get the user's wishlist, creating an empty one on first access.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if a query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<WishListDto, ServiceError> {
        let wishlist = self.wishlists.get_or_create(user_id).await?;
        self.assemble(&wishlist).await
    }

    /// Add a product to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the product doesn't exist and
    /// `ServiceError::Conflict` if it is already in the set.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<WishListDto, ServiceError> {
        let product = self
            .catalog
            .get_product(product_id)
            .await?
            .ok_or(ServiceError::NotFound("product"))?;

        let wishlist = self.wishlists.get_or_create(user_id).await?;

        self.wishlists
            .add(wishlist.id, product.id)
            .await
            .map_err(ServiceError::entity("product"))?;

        self.assemble(&wishlist).await
    }

    /// Remove a product from the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound("wishlist")` if the user has no
    /// wishlist and `ServiceError::NotFound("product in wishlist")` if the
    /// product is not in the set.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<WishListDto, ServiceError> {
        let wishlist = self
            .wishlists
            .find_by_user(user_id)
            .await?
            .ok_or(ServiceError::NotFound("wishlist"))?;

        self.wishlists
            .remove(wishlist.id, product_id)
            .await
            .map_err(ServiceError::entity("product in wishlist"))?;

        self.assemble(&wishlist).await
    }

    /// Empty the wishlist.
    ///
    /// Get-or-create deliberately does not apply here: clearing requires
    /// an existing wishlist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the user has no wishlist.
    pub async fn clear(&self, user_id: UserId) -> Result<(), ServiceError> {
        let wishlist = self
            .wishlists
            .find_by_user(user_id)
            .await?
            .ok_or(ServiceError::NotFound("wishlist"))?;

        self.wishlists.clear(wishlist.id).await?;

        Ok(())
    }

    async fn assemble(&self, wishlist: &WishList) -> Result<WishListDto, ServiceError> {
        let products = self.wishlists.products(wishlist.id).await?;
        Ok(WishListDto::assemble(wishlist, products))
    }
}
