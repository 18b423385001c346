//! Catalog repository: products and categories.
//!
//! Read-only from the storefront's perspective; the seed command is the
//! only writer.

use sqlx::PgPool;

use shopcart_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::catalog::{Category, PageParams, Product};

const SELECT_PRODUCT: &str = "SELECT id, name, description, price, category_id FROM product";

/// Search/filter predicate shared by the product listing queries.
///
/// NULL parameters disable the corresponding filter, which keeps the SQL
/// static instead of string-building per request.
const PRODUCT_FILTER: &str = "($1::text IS NULL \
                              OR name ILIKE '%' || $1 || '%' \
                              OR description ILIKE '%' || $1 || '%') \
                             AND ($2::int4 IS NULL OR category_id = $2)";

/// Filters accepted by the product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive match against name or description.
    pub search: Option<String>,
    /// Restrict to a category.
    pub category_id: Option<CategoryId>,
}

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching the filter, with the total match count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
        page: PageParams,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "{SELECT_PRODUCT} WHERE {PRODUCT_FILTER} ORDER BY id ASC LIMIT $3 OFFSET $4"
        ))
        .bind(filter.search.as_deref())
        .bind(filter.category_id.map(|id| id.as_i32()))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM product WHERE {PRODUCT_FILTER}"
        ))
        .bind(filter.search.as_deref())
        .bind(filter.category_id.map(|id| id.as_i32()))
        .fetch_one(self.pool)
        .await?;

        Ok((products, total))
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE id = $1"))
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        Ok(product)
    }

    /// List all categories by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM category ORDER BY name ASC")
                .fetch_all(self.pool)
                .await?;

        Ok(categories)
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let category = sqlx::query_as::<_, Category>("SELECT id, name FROM category WHERE id = $1")
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        Ok(category)
    }
}
