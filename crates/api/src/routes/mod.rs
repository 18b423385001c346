//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database probe)
//!
//! # Auth
//! POST /auth/register           - Register a new account
//! POST /auth/login              - Login, establishes the session
//! POST /auth/logout             - Logout, clears the session
//!
//! # Catalog (public)
//! GET  /products                - Product listing (?page&per_page&search&category_id)
//! GET  /products/{id}           - Product detail
//! GET  /categories              - Category listing
//! GET  /categories/{id}         - Category detail
//! GET  /categories/{id}/products - Products in a category
//!
//! # Cart (requires auth; every response is the full cart)
//! GET    /cart                  - Get or lazily create the cart
//! POST   /cart/items            - Add a product (merges quantities)
//! PUT    /cart/items/{id}       - Replace a line item's quantity
//! DELETE /cart/items/{id}       - Remove a line item
//!
//! # Wishlist (requires auth)
//! GET    /wishlist              - Get or lazily create the wishlist
//! POST   /wishlist/products     - Add a product (409 on duplicate)
//! DELETE /wishlist/products/{id} - Remove a product
//! DELETE /wishlist              - Clear the wishlist
//!
//! # Addresses (requires auth; mutations return the full address list)
//! GET    /addresses             - List addresses
//! POST   /addresses             - Create an address
//! PUT    /addresses/{id}        - Partially update an address
//! DELETE /addresses/{id}        - Delete an address
//!
//! # Profile (requires auth)
//! GET  /profile                 - Merged account + profile view
//! PUT  /profile                 - Partial profile update
//! PUT  /profile/password        - Change password
//! ```

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod products;
pub mod profile;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{id}", get(categories::show))
        .route("/{id}/products", get(categories::products))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add_item))
        .route(
            "/items/{id}",
            put(cart::update_item).delete(cart::remove_item),
        )
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show).delete(wishlist::clear))
        .route("/products", post(wishlist::add_product))
        .route("/products/{id}", delete(wishlist::remove_product))
}

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(addresses::index).post(addresses::create))
        .route(
            "/{id}",
            put(addresses::update).delete(addresses::remove),
        )
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show).put(profile::update))
        .route("/password", put(profile::change_password))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/addresses", address_routes())
        .nest("/profile", profile_routes())
}
