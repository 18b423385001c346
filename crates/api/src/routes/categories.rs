//! Category route handlers (public, read-only).

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use shopcart_core::CategoryId;

use crate::error::Result;
use crate::models::catalog::PageParams;
use crate::services::catalog::CatalogService;
use crate::state::AppState;

/// List all categories.
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let catalog = CatalogService::new(state.pool());
    let categories = catalog.list_categories().await?;

    Ok(Json(categories))
}

/// Category detail.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<impl IntoResponse> {
    let catalog = CatalogService::new(state.pool());
    let category = catalog.get_category(id).await?;

    Ok(Json(category))
}

/// List a category's products.
pub async fn products(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Query(page): Query<PageParams>,
) -> Result<impl IntoResponse> {
    let catalog = CatalogService::new(state.pool());
    let page = catalog.products_by_category(id, page).await?;

    Ok(Json(page))
}
