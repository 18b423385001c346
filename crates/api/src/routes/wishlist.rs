//! Wishlist route handlers.
//!
//! All routes require authentication; mutations return the full wishlist
//! aggregate except clear, which leaves nothing to render.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use shopcart_core::ProductId;

use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::models::wishlist::AddWishListProduct;
use crate::services::wishlist::WishListService;
use crate::state::AppState;

/// Get the user's wishlist, creating an empty one on first access.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let wishlists = WishListService::new(state.pool());
    let wishlist = wishlists.get_or_create(user.id).await?;

    Ok(Json(wishlist))
}

/// Add a product to the wishlist; 409 if it is already present.
pub async fn add_product(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<AddWishListProduct>,
) -> Result<impl IntoResponse> {
    let wishlists = WishListService::new(state.pool());
    let wishlist = wishlists.add(user.id, payload.product_id).await?;

    Ok(Json(wishlist))
}

/// Remove a product from the wishlist; 404 if it is not present.
pub async fn remove_product(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let wishlists = WishListService::new(state.pool());
    let wishlist = wishlists.remove(user.id, product_id).await?;

    Ok(Json(wishlist))
}

/// Empty the wishlist; 404 if the user has no wishlist yet.
pub async fn clear(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let wishlists = WishListService::new(state.pool());
    wishlists.clear(user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
