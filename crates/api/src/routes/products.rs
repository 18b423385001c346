//! Product catalog route handlers (public, read-only).

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use shopcart_core::{CategoryId, ProductId};

use crate::db::catalog::ProductFilter;
use crate::error::Result;
use crate::models::catalog::PageParams;
use crate::services::catalog::CatalogService;
use crate::state::AppState;

/// Query parameters for the product listing.
///
/// Pagination fields are spelled out here rather than flattened because
/// query-string deserialization does not support `#[serde(flatten)]` for
/// numeric fields.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive match against name or description.
    pub search: Option<String>,
    /// Restrict to a category.
    pub category_id: Option<CategoryId>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    fn page_params(&self) -> PageParams {
        let defaults = PageParams::default();
        PageParams {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}

/// List products, optionally filtered by search term and category.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let catalog = CatalogService::new(state.pool());

    let page_params = query.page_params();
    let filter = ProductFilter {
        search: query.search.filter(|s| !s.trim().is_empty()),
        category_id: query.category_id,
    };
    let page = catalog.list_products(filter, page_params).await?;

    Ok(Json(page))
}

/// Product detail.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let catalog = CatalogService::new(state.pool());
    let product = catalog.get_product(id).await?;

    Ok(Json(product))
}
