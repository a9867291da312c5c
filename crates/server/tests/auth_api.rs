//! Registration, login and token-protected routes.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{recipe_json, TestConfig, TestFixture};

async fn register(fixture: &TestFixture, email: &str, password: &str) -> common::TestResponse {
    fixture
        .post("/users", json!({ "email": email, "password": password }))
        .await
}

#[tokio::test]
async fn test_register_login_and_use_token() {
    let fixture = TestFixture::new().await;

    let response = register(&fixture, "cook@example.com", "hunter22").await;
    assert_status!(response, StatusCode::CREATED);
    assert_json_path!(response.body, "message", json!("User created"));
    let user_id = response.body["userId"].as_str().unwrap().to_string();

    let response = fixture
        .post(
            "/login",
            json!({ "email": "cook@example.com", "password": "hunter22" }),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    let token = response.body["accessToken"].as_str().unwrap().to_string();

    let response = fixture.get_auth("/protected", &token).await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body["tokenData"], "user_id", json!(user_id));
    assert_json_path!(
        response.body["tokenData"],
        "email",
        json!("cook@example.com")
    );
    assert!(response.body["tokenData"]["exp"].is_number());

    let response = fixture
        .post_auth(
            "/recipes",
            recipe_json("Soup", "French", &["light"], &["Water"]),
            &token,
        )
        .await;
    assert_status!(response, StatusCode::CREATED);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let fixture = TestFixture::new().await;

    assert_status!(
        register(&fixture, "cook@example.com", "pw").await,
        StatusCode::CREATED
    );
    let response = register(&fixture, "COOK@example.com", "other").await;
    assert_status!(response, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_requires_fields() {
    let fixture = TestFixture::new().await;

    let response = register(&fixture, "", "pw").await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = fixture
        .post("/users", json!({ "email": "cook@example.com" }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mistyped_credentials_are_bad_requests() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/users", json!({ "email": 42, "password": "pw" }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_json_path!(response.body, "error", json!("Invalid request body"));

    let response = fixture
        .post("/login", json!({ "email": "cook@example.com", "password": ["pw"] }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_json_path!(response.body, "error", json!("Invalid request body"));
}

#[tokio::test]
async fn test_invalid_login() {
    let fixture = TestFixture::new().await;
    register(&fixture, "cook@example.com", "right").await;

    let response = fixture
        .post(
            "/login",
            json!({ "email": "cook@example.com", "password": "wrong" }),
        )
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
    assert_json_path!(response.body, "error", json!("Invalid login"));

    let response = fixture
        .post(
            "/login",
            json!({ "email": "nobody@example.com", "password": "right" }),
        )
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
    assert_json_path!(response.body, "error", json!("Invalid login"));
}

#[tokio::test]
async fn test_protected_requires_token() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/protected").await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
    assert!(response.body.is_null());

    let response = fixture.get_auth("/protected", "not.a.token").await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_with_open_access() {
    let fixture = TestFixture::with_config(TestConfig::open_access()).await;

    let response = fixture.get("/protected").await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "tokenData", json!({}));
}
