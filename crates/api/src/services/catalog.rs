//! Catalog service.
//!
//! Read-only product and category browsing with pagination. Also the
//! "catalog reader" used by the cart and wishlist services to validate
//! product existence and snapshot prices.

use sqlx::PgPool;

use shopcart_core::{CategoryId, ProductId};

use super::ServiceError;
use crate::db::catalog::{CatalogRepository, ProductFilter};
use crate::models::catalog::{Category, Page, PageParams, Product};

/// Catalog service.
pub struct CatalogService<'a> {
    catalog: CatalogRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            catalog: CatalogRepository::new(pool),
        }
    }

    /// List products matching the filter.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if a query fails.
    pub async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageParams,
    ) -> Result<Page<Product>, ServiceError> {
        let (products, total) = self.catalog.list_products(&filter, page).await?;
        Ok(Page::new(products, total, page))
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the product doesn't exist.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.catalog
            .get_product(id)
            .await?
            .ok_or(ServiceError::NotFound("product"))
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
        Ok(self.catalog.list_categories().await?)
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the category doesn't exist.
    pub async fn get_category(&self, id: CategoryId) -> Result<Category, ServiceError> {
        self.catalog
            .get_category(id)
            .await?
            .ok_or(ServiceError::NotFound("category"))
    }

    /// List a category's products, verifying the category exists first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the category doesn't exist.
    pub async fn products_by_category(
        &self,
        category_id: CategoryId,
        page: PageParams,
    ) -> Result<Page<Product>, ServiceError> {
        self.get_category(category_id).await?;

        let filter = ProductFilter {
            search: None,
            category_id: Some(category_id),
        };
        self.list_products(filter, page).await
    }
}
