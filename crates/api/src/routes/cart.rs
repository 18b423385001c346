//! Cart route handlers.
//!
//! All routes require authentication and return the full cart aggregate,
//! so the client can render without a follow-up read.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use shopcart_core::CartItemId;

use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::models::cart::{AddCartItem, UpdateCartItem};
use crate::services::cart::CartService;
use crate::state::AppState;

/// Get the user's cart, creating an empty one on first access.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let carts = CartService::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;

    Ok(Json(cart))
}

/// Add a product to the cart, merging quantities on re-add.
pub async fn add_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<AddCartItem>,
) -> Result<impl IntoResponse> {
    let carts = CartService::new(state.pool());
    let cart = carts
        .add_item(user.id, payload.product_id, payload.quantity)
        .await?;

    Ok(Json(cart))
}

/// Replace a line item's quantity.
pub async fn update_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<CartItemId>,
    Json(payload): Json<UpdateCartItem>,
) -> Result<impl IntoResponse> {
    let carts = CartService::new(state.pool());
    let cart = carts
        .update_item_quantity(user.id, item_id, payload.quantity)
        .await?;

    Ok(Json(cart))
}

/// Remove a line item from the cart.
pub async fn remove_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<CartItemId>,
) -> Result<impl IntoResponse> {
    let carts = CartService::new(state.pool());
    let cart = carts.remove_item(user.id, item_id).await?;

    Ok(Json(cart))
}
