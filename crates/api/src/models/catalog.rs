//! Catalog domain types: products, categories, pagination.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shopcart_core::{CategoryId, ProductId};

/// A catalog product.
///
/// Read-mostly; the storefront never mutates products, it only references
/// them from carts and wishlists.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Current catalog price. Carts snapshot this at add-time and never
    /// re-read it.
    pub price: Decimal,
    /// Owning category, if any.
    pub category_id: Option<CategoryId>,
}

/// A product category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    pub name: String,
}

/// Pagination parameters accepted by listing endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Page size, clamped to [1, 100].
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

const fn default_page() -> u32 {
    1
}

const fn default_per_page() -> u32 {
    20
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageParams {
    /// Maximum page size.
    pub const MAX_PER_PAGE: u32 = 100;

    /// Effective page size after clamping.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        let per_page = if self.per_page == 0 {
            1
        } else if self.per_page > Self::MAX_PER_PAGE {
            Self::MAX_PER_PAGE
        } else {
            self.per_page
        };
        per_page as i64
    }

    /// Row offset for the requested page.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        let page = if self.page == 0 { 1 } else { self.page };
        (page as i64 - 1) * self.limit()
    }
}

/// A page of results with the total count for the query.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching rows across all pages.
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    /// Assemble a page envelope from items and the total count.
    #[must_use]
    pub fn new(items: Vec<T>, total: i64, params: PageParams) -> Self {
        // limit() is clamped to [1, 100] so the cast cannot lose anything
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let per_page = params.limit() as u32;

        Self {
            items,
            total,
            page: if params.page == 0 { 1 } else { params.page },
            per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_clamps() {
        let params = PageParams {
            page: 1,
            per_page: 500,
        };
        assert_eq!(params.limit(), 100);

        let params = PageParams {
            page: 1,
            per_page: 0,
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_offset() {
        let params = PageParams {
            page: 3,
            per_page: 20,
        };
        assert_eq!(params.offset(), 40);

        // Page 0 is treated as page 1
        let params = PageParams {
            page: 0,
            per_page: 20,
        };
        assert_eq!(params.offset(), 0);
    }
}
