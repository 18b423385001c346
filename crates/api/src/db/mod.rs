//! Database operations for the Shopcart `PostgreSQL` database.
//!
//! # Tables
//!
//! - `app_user` / `user_password` - Accounts and password credentials
//! - `profile` - Optional per-user profile overlay
//! - `category` / `product` - Read-mostly catalog
//! - `address` - Shipping/billing addresses (partial unique index keeps at
//!   most one default per user)
//! - `cart` / `cart_item` - One cart per user, one line per product
//! - `wishlist` / `wishlist_product` - One wishlist per user, set semantics
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p shopcart-cli -- migrate
//! ```
//!
//! # Consistency
//!
//! Every multi-statement operation opens its own transaction; the
//! single-default-address and one-line-per-product invariants are enforced
//! by the storage layer (partial unique index, `ON CONFLICT` upserts, row
//! locks on the owning user), never by in-process locks, so they hold
//! across concurrent server instances.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod addresses;
pub mod carts;
pub mod catalog;
pub mod profiles;
pub mod users;
pub mod wishlists;

/// Errors returned by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found (or is not owned by the caller).
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
