//! Integration tests for cart line-item management.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied and the
//!   catalog seeded (cargo run -p shopcart-cli -- seed)
//! - The API server running (cargo run -p shopcart-api)
//!
//! Run with: cargo test -p shopcart-integration-tests -- --ignored

use reqwest::Client;
use serde_json::{Value, json};

use shopcart_integration_tests::{api_base_url, client, register, seeded_products};

async fn add_item(client: &Client, product_id: &Value, quantity: i64) -> (u16, Value) {
    let base_url = api_base_url();
    let resp = client
        .post(format!("{base_url}/cart/items"))
        .json(&json!({ "product_id": product_id, "quantity": quantity }))
        .send()
        .await
        .expect("Failed to add cart item");

    let status = resp.status().as_u16();
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

// ============================================================================
// Get-Or-Create Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_first_access_creates_empty_cart() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;

    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), 200);

    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert!(cart["items"].as_array().expect("items array").is_empty());
    assert_eq!(cart["total"], json!("0"));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_concurrent_first_access_yields_one_cart() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;

    let first = client.get(format!("{base_url}/cart")).send();
    let second = client.get(format!("{base_url}/cart")).send();
    let (first, second) = tokio::join!(first, second);

    let first: Value = first
        .expect("first request failed")
        .json()
        .await
        .expect("Failed to parse cart");
    let second: Value = second
        .expect("second request failed")
        .json()
        .await
        .expect("Failed to parse cart");

    // Both requests observe the same cart row
    assert_eq!(first["id"], second["id"]);
}

// ============================================================================
// Line-Item Merge Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_add_same_product_merges_quantities() {
    let client = client();
    register(&client).await;
    let products = seeded_products(&client).await;
    let product_id = &products[0]["id"];

    let (status, cart) = add_item(&client, product_id, 2).await;
    assert_eq!(status, 200);
    assert_eq!(cart["items"].as_array().expect("items").len(), 1);
    assert_eq!(cart["items"][0]["quantity"], json!(2));

    // Re-adding the same product merges into the existing line
    let (status, cart) = add_item(&client, product_id, 3).await;
    assert_eq!(status, 200);
    let items = cart["items"].as_array().expect("items");
    assert_eq!(items.len(), 1, "no duplicate line for the same product");
    assert_eq!(items[0]["quantity"], json!(5));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_distinct_products_get_distinct_lines() {
    let client = client();
    register(&client).await;
    let products = seeded_products(&client).await;

    let (_, _) = add_item(&client, &products[0]["id"], 1).await;
    let (status, cart) = add_item(&client, &products[1]["id"], 1).await;

    assert_eq!(status, 200);
    assert_eq!(cart["items"].as_array().expect("items").len(), 2);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_line_total_uses_snapshot_price() {
    let client = client();
    register(&client).await;
    let products = seeded_products(&client).await;
    let product = &products[0];

    let (_, cart) = add_item(&client, &product["id"], 3).await;
    let item = &cart["items"][0];

    assert_eq!(item["unit_price"], product["price"]);

    let unit: f64 = item["unit_price"]
        .as_str()
        .expect("price string")
        .parse()
        .expect("parse price");
    let line: f64 = item["line_total"]
        .as_str()
        .expect("line total string")
        .parse()
        .expect("parse line total");
    assert!((line - unit * 3.0).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running API server, seeded database and DATABASE_URL"]
async fn test_price_snapshot_survives_catalog_price_change() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;
    let products = seeded_products(&client).await;
    let product = &products[0];
    let product_id = product["id"].as_i64().expect("product id");

    let (_, cart) = add_item(&client, &product["id"], 1).await;
    let snapshot = cart["items"][0]["unit_price"].clone();

    // Change the catalog price out from under the cart
    let database_url = std::env::var("SHOPCART_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("DATABASE_URL must be set for this test");
    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");
    sqlx::query("UPDATE product SET price = price + 10 WHERE id = $1")
        .bind(i32::try_from(product_id).expect("product id fits i32"))
        .execute(&pool)
        .await
        .expect("Failed to update product price");

    // The stored line price must not move
    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["items"][0]["unit_price"], snapshot);

    // Restore the catalog price for other tests
    sqlx::query("UPDATE product SET price = price - 10 WHERE id = $1")
        .bind(i32::try_from(product_id).expect("product id fits i32"))
        .execute(&pool)
        .await
        .expect("Failed to restore product price");
}

// ============================================================================
// Quantity Validation Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_non_positive_quantity_rejected_before_mutation() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;
    let products = seeded_products(&client).await;

    let (status, _) = add_item(&client, &products[0]["id"], 0).await;
    assert_eq!(status, 400);

    let (status, _) = add_item(&client, &products[0]["id"], -2).await;
    assert_eq!(status, 400);

    // No state change happened
    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert!(cart["items"].as_array().expect("items").is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_unknown_product_not_found() {
    let client = client();
    register(&client).await;

    let (status, _) = add_item(&client, &json!(999_999), 1).await;
    assert_eq!(status, 404);
}

// ============================================================================
// Update & Remove Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_update_replaces_quantity() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;
    let products = seeded_products(&client).await;

    let (_, cart) = add_item(&client, &products[0]["id"], 2).await;
    let item_id = cart["items"][0]["id"].clone();

    let resp = client
        .put(format!("{base_url}/cart/items/{item_id}"))
        .json(&json!({ "quantity": 7 }))
        .send()
        .await
        .expect("Failed to update item");
    assert_eq!(resp.status(), 200);

    let cart: Value = resp.json().await.expect("Failed to parse cart");
    // Replace semantics, not merge
    assert_eq!(cart["items"][0]["quantity"], json!(7));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_remove_deletes_line() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;
    let products = seeded_products(&client).await;

    let (_, cart) = add_item(&client, &products[0]["id"], 1).await;
    let item_id = cart["items"][0]["id"].clone();

    let resp = client
        .delete(format!("{base_url}/cart/items/{item_id}"))
        .send()
        .await
        .expect("Failed to remove item");
    assert_eq!(resp.status(), 200);

    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert!(cart["items"].as_array().expect("items").is_empty());

    // Removing again is 404: the row is gone, not just hidden
    let resp = client
        .delete(format!("{base_url}/cart/items/{item_id}"))
        .send()
        .await
        .expect("Failed to send remove");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_foreign_cart_item_reads_as_not_found() {
    let alice = client();
    register(&alice).await;
    let products = seeded_products(&alice).await;
    let (_, cart) = add_item(&alice, &products[0]["id"], 1).await;
    let alice_item_id = cart["items"][0]["id"].clone();

    let mallory = client();
    register(&mallory).await;

    let base_url = api_base_url();
    let resp = mallory
        .put(format!("{base_url}/cart/items/{alice_item_id}"))
        .json(&json!({ "quantity": 1 }))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), 404);

    let resp = mallory
        .delete(format!("{base_url}/cart/items/{alice_item_id}"))
        .send()
        .await
        .expect("Failed to send remove");
    assert_eq!(resp.status(), 404);
}
