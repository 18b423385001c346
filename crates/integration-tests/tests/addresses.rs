//! Integration tests for the default-address invariant.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p shopcart-api)
//!
//! Run with: cargo test -p shopcart-integration-tests -- --ignored

use reqwest::Client;
use serde_json::{Value, json};

use shopcart_integration_tests::{api_base_url, client, register};

fn address_payload(street: &str, is_default: bool) -> Value {
    json!({
        "street": street,
        "city": "Springfield",
        "state": "IL",
        "zip_code": "62701",
        "country": "US",
        "is_default": is_default,
    })
}

async fn create_address(client: &Client, street: &str, is_default: bool) -> Vec<Value> {
    let base_url = api_base_url();
    let resp = client
        .post(format!("{base_url}/addresses"))
        .json(&address_payload(street, is_default))
        .send()
        .await
        .expect("Failed to create address");

    assert_eq!(resp.status(), 201);
    resp.json::<Vec<Value>>()
        .await
        .expect("Failed to parse address list")
}

fn default_count(addresses: &[Value]) -> usize {
    addresses
        .iter()
        .filter(|a| a["is_default"] == json!(true))
        .count()
}

fn find<'a>(addresses: &'a [Value], street: &str) -> &'a Value {
    addresses
        .iter()
        .find(|a| a["street"] == json!(street))
        .expect("address not in list")
}

// ============================================================================
// Single-Default Invariant Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_first_address_forced_default() {
    let client = client();
    register(&client).await;

    // requested_default = false is overridden for the first address
    let addresses = create_address(&client, "1 Main St", false).await;

    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0]["is_default"], json!(true));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_default_moves_on_create() {
    let client = client();
    register(&client).await;

    create_address(&client, "1 Main St", false).await;
    let addresses = create_address(&client, "2 Oak Ave", true).await;

    assert_eq!(addresses.len(), 2);
    assert_eq!(default_count(&addresses), 1);
    assert_eq!(find(&addresses, "1 Main St")["is_default"], json!(false));
    assert_eq!(find(&addresses, "2 Oak Ave")["is_default"], json!(true));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_non_default_create_leaves_default_alone() {
    let client = client();
    register(&client).await;

    create_address(&client, "1 Main St", false).await;
    let addresses = create_address(&client, "2 Oak Ave", false).await;

    assert_eq!(default_count(&addresses), 1);
    assert_eq!(find(&addresses, "1 Main St")["is_default"], json!(true));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_update_moves_default() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;

    create_address(&client, "1 Main St", false).await;
    let addresses = create_address(&client, "2 Oak Ave", false).await;
    let second_id = find(&addresses, "2 Oak Ave")["id"].clone();

    let resp = client
        .put(format!("{base_url}/addresses/{second_id}"))
        .json(&json!({ "is_default": true }))
        .send()
        .await
        .expect("Failed to update address");
    assert_eq!(resp.status(), 200);

    let addresses: Vec<Value> = resp.json().await.expect("Failed to parse address list");
    assert_eq!(default_count(&addresses), 1);
    assert_eq!(find(&addresses, "2 Oak Ave")["is_default"], json!(true));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_partial_update_leaves_absent_fields() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;

    let addresses = create_address(&client, "1 Main St", false).await;
    let id = addresses[0]["id"].clone();

    let resp = client
        .put(format!("{base_url}/addresses/{id}"))
        .json(&json!({ "city": "Shelbyville" }))
        .send()
        .await
        .expect("Failed to update address");
    assert_eq!(resp.status(), 200);

    let addresses: Vec<Value> = resp.json().await.expect("Failed to parse address list");
    assert_eq!(addresses[0]["city"], json!("Shelbyville"));
    // Untouched fields keep their values, including the default flag
    assert_eq!(addresses[0]["street"], json!("1 Main St"));
    assert_eq!(addresses[0]["is_default"], json!(true));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_delete_default_promotes_remaining() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;

    // A is created first and starts as default; B takes the flag over
    create_address(&client, "1 Main St", false).await;
    let addresses = create_address(&client, "2 Oak Ave", true).await;
    let second_id = find(&addresses, "2 Oak Ave")["id"].clone();

    let resp = client
        .delete(format!("{base_url}/addresses/{second_id}"))
        .send()
        .await
        .expect("Failed to delete address");
    assert_eq!(resp.status(), 200);

    let addresses: Vec<Value> = resp.json().await.expect("Failed to parse address list");
    assert_eq!(addresses.len(), 1);
    // The oldest remaining address is promoted
    assert_eq!(addresses[0]["street"], json!("1 Main St"));
    assert_eq!(addresses[0]["is_default"], json!(true));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_delete_last_address_leaves_zero_defaults() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;

    let addresses = create_address(&client, "1 Main St", true).await;
    let id = addresses[0]["id"].clone();

    let resp = client
        .delete(format!("{base_url}/addresses/{id}"))
        .send()
        .await
        .expect("Failed to delete address");
    assert_eq!(resp.status(), 200);

    let addresses: Vec<Value> = resp.json().await.expect("Failed to parse address list");
    assert!(addresses.is_empty());
}

// ============================================================================
// Ownership & Validation Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_foreign_address_reads_as_not_found() {
    let alice = client();
    register(&alice).await;
    let addresses = create_address(&alice, "1 Main St", true).await;
    let alice_address_id = addresses[0]["id"].clone();

    let mallory = client();
    register(&mallory).await;

    let base_url = api_base_url();
    // Ownership failures are 404, never 403, so existence isn't leaked
    let resp = mallory
        .delete(format!("{base_url}/addresses/{alice_address_id}"))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), 404);

    let resp = mallory
        .put(format!("{base_url}/addresses/{alice_address_id}"))
        .json(&json!({ "city": "Nowhere" }))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_blank_required_field_rejected() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;

    let resp = client
        .post(format!("{base_url}/addresses"))
        .json(&json!({
            "street": "  ",
            "city": "Springfield",
            "state": "IL",
            "zip_code": "62701",
            "country": "US",
        }))
        .send()
        .await
        .expect("Failed to send create");
    assert_eq!(resp.status(), 400);

    // Nothing was created
    let resp = client
        .get(format!("{base_url}/addresses"))
        .send()
        .await
        .expect("Failed to list addresses");
    let addresses: Vec<Value> = resp.json().await.expect("Failed to parse address list");
    assert!(addresses.is_empty());
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_concurrent_set_default_leaves_one_default() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;

    create_address(&client, "1 Main St", false).await;
    let addresses = create_address(&client, "2 Oak Ave", false).await;
    let first_id = find(&addresses, "1 Main St")["id"].clone();
    let second_id = find(&addresses, "2 Oak Ave")["id"].clone();

    // Race two set-default updates against each other
    let set_first = client
        .put(format!("{base_url}/addresses/{first_id}"))
        .json(&json!({ "is_default": true }))
        .send();
    let set_second = client
        .put(format!("{base_url}/addresses/{second_id}"))
        .json(&json!({ "is_default": true }))
        .send();

    let (first, second) = tokio::join!(set_first, set_second);
    assert!(first.expect("first update failed").status().is_success());
    assert!(second.expect("second update failed").status().is_success());

    // Whichever won, exactly one default must be standing
    let resp = client
        .get(format!("{base_url}/addresses"))
        .send()
        .await
        .expect("Failed to list addresses");
    let addresses: Vec<Value> = resp.json().await.expect("Failed to parse address list");
    assert_eq!(default_count(&addresses), 1);
}
