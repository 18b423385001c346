//! Integration tests for registration, login and profile management.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p shopcart-api)
//!
//! Run with: cargo test -p shopcart-integration-tests -- --ignored

use serde_json::{Value, json};

use shopcart_integration_tests::{TestAccount, api_base_url, client, register};

// ============================================================================
// Registration & Login Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_login_logout_roundtrip() {
    let client = client();
    let base_url = api_base_url();
    let account = register(&client).await;

    // Session established by registration
    let resp = client
        .get(format!("{base_url}/profile"))
        .send()
        .await
        .expect("Failed to get profile");
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(format!("{base_url}/auth/logout"))
        .send()
        .await
        .expect("Failed to logout");
    assert_eq!(resp.status(), 204);

    // Session gone
    let resp = client
        .get(format!("{base_url}/profile"))
        .send()
        .await
        .expect("Failed to get profile");
    assert_eq!(resp.status(), 401);

    // Fresh login works
    let resp = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({ "email": account.email, "password": account.password }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_duplicate_registration_conflicts() {
    let client = client();
    let base_url = api_base_url();
    let account = register(&client).await;

    // Same email, different username
    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({
            "username": format!("{}x", account.username),
            "email": account.email,
            "password": account.password,
        }))
        .send()
        .await
        .expect("Failed to send register");
    assert_eq!(resp.status(), 409);

    // Same username, different email
    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({
            "username": account.username,
            "email": format!("x{}", account.email),
            "password": account.password,
        }))
        .send()
        .await
        .expect("Failed to send register");
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_wrong_password_unauthorized() {
    let client = client();
    let base_url = api_base_url();
    let account = register(&client).await;

    let fresh = shopcart_integration_tests::client();
    let resp = fresh
        .post(format!("{base_url}/auth/login"))
        .json(&json!({ "email": account.email, "password": "wrong-password" }))
        .send()
        .await
        .expect("Failed to send login");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_weak_password_rejected() {
    let client = client();
    let base_url = api_base_url();
    let account = TestAccount::unique();

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({
            "username": account.username,
            "email": account.email,
            "password": "short",
        }))
        .send()
        .await
        .expect("Failed to send register");
    assert_eq!(resp.status(), 400);
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_profile_partial_update() {
    let client = client();
    let base_url = api_base_url();
    register(&client).await;

    let resp = client
        .put(format!("{base_url}/profile"))
        .json(&json!({ "first_name": "Ada", "bio": "hello" }))
        .send()
        .await
        .expect("Failed to update profile");
    assert_eq!(resp.status(), 200);

    let resp = client
        .put(format!("{base_url}/profile"))
        .json(&json!({ "last_name": "Lovelace" }))
        .send()
        .await
        .expect("Failed to update profile");
    assert_eq!(resp.status(), 200);

    let profile: Value = resp.json().await.expect("Failed to parse profile");
    // Earlier fields survive the later partial update
    assert_eq!(profile["first_name"], json!("Ada"));
    assert_eq!(profile["last_name"], json!("Lovelace"));
    assert_eq!(profile["bio"], json!("hello"));
    assert_eq!(profile["phone"], Value::Null);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_username_change_to_taken_name_conflicts() {
    let alice = client();
    let alice_account = register(&alice).await;

    let bob = client();
    register(&bob).await;

    let base_url = api_base_url();
    let resp = bob
        .put(format!("{base_url}/profile"))
        .json(&json!({ "username": alice_account.username }))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_change_password() {
    let client = client();
    let base_url = api_base_url();
    let account = register(&client).await;

    // Wrong current password is rejected
    let resp = client
        .put(format!("{base_url}/profile/password"))
        .json(&json!({
            "current_password": "not-the-password",
            "new_password": "brand-new-password",
        }))
        .send()
        .await
        .expect("Failed to send change");
    assert_eq!(resp.status(), 401);

    let resp = client
        .put(format!("{base_url}/profile/password"))
        .json(&json!({
            "current_password": account.password,
            "new_password": "brand-new-password",
        }))
        .send()
        .await
        .expect("Failed to change password");
    assert_eq!(resp.status(), 204);

    // New password logs in
    let fresh = shopcart_integration_tests::client();
    let resp = fresh
        .post(format!("{base_url}/auth/login"))
        .json(&json!({ "email": account.email, "password": "brand-new-password" }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), 200);
}
