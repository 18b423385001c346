//! Integration tests for Shopcart.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL, run migrations and seed the catalog
//! cargo run -p shopcart-cli -- migrate
//! cargo run -p shopcart-cli -- seed
//!
//! # Start the API
//! cargo run -p shopcart-api
//!
//! # Run integration tests
//! cargo test -p shopcart-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `account` - Registration, login, profile
//! - `addresses` - Default-address invariant (incl. concurrency)
//! - `cart` - Line-item merge, price snapshot, ownership
//! - `wishlist` - Set semantics

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Create an HTTP client with a cookie store, so the session established
/// at login is carried by subsequent requests.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Credentials for a throwaway test account.
#[derive(Debug, Clone)]
pub struct TestAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl TestAccount {
    /// Generate unique credentials so parallel test runs never collide.
    #[must_use]
    pub fn unique() -> Self {
        let tag = Uuid::new_v4().simple().to_string();
        let short = tag.get(..12).unwrap_or(&tag);
        Self {
            username: format!("user-{short}"),
            email: format!("{short}@test.example"),
            password: "integration-test-pw".to_string(),
        }
    }
}

/// Register a fresh account; the client's cookie store ends up holding an
/// authenticated session.
///
/// # Panics
///
/// Panics if the registration request fails.
pub async fn register(client: &Client) -> TestAccount {
    let account = TestAccount::unique();
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({
            "username": account.username,
            "email": account.email,
            "password": account.password,
        }))
        .send()
        .await
        .expect("Failed to register test account");

    assert_eq!(resp.status(), 201, "registration should succeed");
    account
}

/// Fetch the first page of products and return the items array.
///
/// # Panics
///
/// Panics if the request fails or the catalog is empty (run the seed
/// command first).
pub async fn seeded_products(client: &Client) -> Vec<Value> {
    let base_url = api_base_url();
    let resp = client
        .get(format!("{base_url}/products?per_page=50"))
        .send()
        .await
        .expect("Failed to list products");

    let body: Value = resp.json().await.expect("Failed to parse product page");
    let items = body["items"].as_array().cloned().unwrap_or_default();
    assert!(
        !items.is_empty(),
        "catalog is empty; run `shopcart-cli seed` first"
    );
    items
}
