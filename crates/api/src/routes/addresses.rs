//! Address route handlers.
//!
//! All routes require authentication; every mutation returns the user's
//! full address list. After any of these completes, a user with at least
//! one address has exactly one default.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use shopcart_core::AddressId;

use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::models::address::{AddressChanges, NewAddress};
use crate::services::addresses::AddressService;
use crate::state::AppState;

/// List the user's addresses.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let addresses = AddressService::new(state.pool());
    let list = addresses.list(user.id).await?;

    Ok(Json(list))
}

/// Create an address; the first address is always made the default.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<NewAddress>,
) -> Result<impl IntoResponse> {
    let addresses = AddressService::new(state.pool());
    let list = addresses.create(user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(list)))
}

/// Partially update an address; absent fields are left untouched.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(address_id): Path<AddressId>,
    Json(payload): Json<AddressChanges>,
) -> Result<impl IntoResponse> {
    let addresses = AddressService::new(state.pool());
    let list = addresses.update(user.id, address_id, payload).await?;

    Ok(Json(list))
}

/// Delete an address, promoting another to default if needed.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(address_id): Path<AddressId>,
) -> Result<impl IntoResponse> {
    let addresses = AddressService::new(state.pool());
    let list = addresses.delete(user.id, address_id).await?;

    Ok(Json(list))
}
