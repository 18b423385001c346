//! Integration tests for wishlist set semantics.
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

async fn add_product(client: &Client, product_id: &Value) -> (u16, Value) {
    let base_url = api_base_url();
    let resp = client
        .post(format!("{base_url}/wishlist/products"))
        .json(&json!({ "product_id": product_id }))
        .send()
        .await
        .expect("Failed to add wishlist product");

    let status = resp.status().as_u16();
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_first_access_creates_empty_wishlist() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;

    let resp = client
        .get(format!("{base_url}/wishlist"))
        .send()
        .await
        .expect("Failed to get wishlist");
    assert_eq!(resp.status(), 200);

    let wishlist: Value = resp.json().await.expect("Failed to parse wishlist");
    assert!(
        wishlist["products"]
            .as_array()
            .expect("products array")
            .is_empty()
    );
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_duplicate_add_conflicts() {
    let client = client();
    register(&client).await;
    let products = seeded_products(&client).await;
    let product_id = &products[0]["id"];

    let (status, wishlist) = add_product(&client, product_id).await;
    assert_eq!(status, 200);
    assert_eq!(wishlist["products"].as_array().expect("products").len(), 1);

    // Explicit rejection, not a silent no-op
    let (status, _) = add_product(&client, product_id).await;
    assert_eq!(status, 409);

    // Still exactly one entry
    let base_url = api_base_url();
    let resp = client
        .get(format!("{base_url}/wishlist"))
        .send()
        .await
        .expect("Failed to get wishlist");
    let wishlist: Value = resp.json().await.expect("Failed to parse wishlist");
    assert_eq!(wishlist["products"].as_array().expect("products").len(), 1);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_unknown_product_not_found() {
    let client = client();
    register(&client).await;

    let (status, _) = add_product(&client, &json!(999_999)).await;
    assert_eq!(status, 404);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_remove_then_remove_again() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;
    let products = seeded_products(&client).await;
    let product_id = products[0]["id"].clone();

    add_product(&client, &product_id).await;

    let resp = client
        .delete(format!("{base_url}/wishlist/products/{product_id}"))
        .send()
        .await
        .expect("Failed to remove product");
    assert_eq!(resp.status(), 200);

    // Second removal fails: the product is no longer in the set
    let resp = client
        .delete(format!("{base_url}/wishlist/products/{product_id}"))
        .send()
        .await
        .expect("Failed to send remove");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_clear_requires_existing_wishlist() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;

    // No wishlist yet: clear is 404, get-or-create is not applied here
    let resp = client
        .delete(format!("{base_url}/wishlist"))
        .send()
        .await
        .expect("Failed to send clear");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_clear_empties_wishlist() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;
    let products = seeded_products(&client).await;

    add_product(&client, &products[0]["id"]).await;
    add_product(&client, &products[1]["id"]).await;

    let resp = client
        .delete(format!("{base_url}/wishlist"))
        .send()
        .await
        .expect("Failed to clear wishlist");
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{base_url}/wishlist"))
        .send()
        .await
        .expect("Failed to get wishlist");
    let wishlist: Value = resp.json().await.expect("Failed to parse wishlist");
    assert!(
        wishlist["products"]
            .as_array()
            .expect("products")
            .is_empty()
    );
}
