//! Recipe and reference data endpoints, driven through the router.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{recipe_json, TestConfig, TestFixture};

fn names(body: &serde_json::Value) -> Vec<String> {
    body["recipes"]
        .as_array()
        .expect("recipes array")
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect()
}

async fn populated() -> TestFixture {
    let fixture = TestFixture::new().await;
    fixture
        .create_recipe(recipe_json(
            "Garlic Chicken",
            "Italian",
            &["popular", "dinner"],
            &["Chicken Breast", "Garlic Paste"],
        ))
        .await;
    fixture
        .create_recipe(recipe_json(
            "Chicken Rice",
            "Chinese",
            &["popular"],
            &["Chicken Breast", "Jasmine Rice"],
        ))
        .await;
    fixture
        .create_recipe(recipe_json(
            "Green Curry",
            "Thai",
            &["spicy"],
            &["Coconut Milk", "Green Curry Paste"],
        ))
        .await;
    fixture
}

#[tokio::test]
async fn test_create_and_fetch_expands_references() {
    let fixture = TestFixture::new().await;
    let id = fixture
        .create_recipe(recipe_json("Pad Thai", "Thai", &["quick", "easy"], &["Rice Noodles"]))
        .await;

    let response = fixture.get(&format!("/recipes/{}", id)).await;
    assert_status!(response, StatusCode::OK);

    let recipe = &response.body["recipe"];
    assert_json_path!(recipe, "_id", json!(id));
    assert_json_path!(recipe["cuisine"], "name", json!("Thai"));
    assert!(recipe["cuisine"]["_id"].is_string());
    assert_eq!(recipe["tags"].as_array().unwrap().len(), 2);
    assert!(recipe["tags"][0]["_id"].is_string());
    assert_json_path!(recipe, "prepTime", json!(10));
    assert_json_path!(recipe["ingredients"][0], "quantity", json!("1 cup"));
}

#[tokio::test]
async fn test_create_response_shape() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .post_auth(
            "/recipes",
            recipe_json("Soup", "French", &["light"], &["Water"]),
            &fixture.token(),
        )
        .await;

    assert_status!(response, StatusCode::CREATED);
    assert_json_path!(response.body, "message", json!("Recipe created"));
    assert_eq!(response.body["recipeId"].as_str().unwrap().len(), 32);
}

#[tokio::test]
async fn test_search_without_params_lists_summaries() {
    let fixture = populated().await;

    let response = fixture.get("/recipes").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(names(&response.body).len(), 3);

    // Summaries leave out the full body
    let first = &response.body["recipes"][0];
    assert!(first["prepTime"].is_number());
    assert!(first.get("instructions").is_none());
    assert!(first.get("ingredients").is_none());
}

#[tokio::test]
async fn test_search_by_name_is_case_insensitive() {
    let fixture = populated().await;

    let response = fixture.get("/recipes?name=CHICKEN").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(names(&response.body), vec!["Chicken Rice", "Garlic Chicken"]);
}

#[tokio::test]
async fn test_search_by_tags_matches_any() {
    let fixture = populated().await;

    let response = fixture.get("/recipes?tags=dinner,spicy").await;
    assert_eq!(names(&response.body), vec!["Garlic Chicken", "Green Curry"]);
}

#[tokio::test]
async fn test_search_by_ingredients_requires_all() {
    let fixture = populated().await;

    let response = fixture.get("/recipes?ingredients=chicken,%20garlic").await;
    assert_eq!(names(&response.body), vec!["Garlic Chicken"]);

    let response = fixture.get("/recipes?ingredients=chicken,coconut").await;
    assert!(names(&response.body).is_empty());
}

#[tokio::test]
async fn test_search_treats_name_as_literal() {
    let fixture = populated().await;

    let response = fixture.get("/recipes?name=.*").await;
    assert_status!(response, StatusCode::OK);
    assert!(names(&response.body).is_empty());
}

#[tokio::test]
async fn test_get_unknown_and_malformed_ids() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/recipes/0123456789abcdef0123456789abcdef").await;
    assert_status!(response, StatusCode::NOT_FOUND);

    let response = fixture.get("/recipes/not-an-id").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let fixture = TestFixture::new().await;
    let token = fixture.token();

    let mut missing = recipe_json("Soup", "French", &["light"], &["Water"]);
    missing.as_object_mut().unwrap().remove("servings");
    let response = fixture.post_auth("/recipes", missing, &token).await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_json_path!(response.body, "error", json!("Missing fields"));

    let response = fixture
        .post_auth(
            "/recipes",
            recipe_json("Soup", "Martian", &["light"], &["Water"]),
            &token,
        )
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_json_path!(response.body, "error", json!("Invalid cuisine"));

    let response = fixture
        .post_auth(
            "/recipes",
            recipe_json("Soup", "French", &["quick", "nonexistent-tag"], &["Water"]),
            &token,
        )
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_json_path!(response.body, "error", json!("One or more tags is invalid"));
}

#[tokio::test]
async fn test_create_rejects_mistyped_body() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .post_raw("/recipes", r#"{"name": "Soup", "servings": "four"}"#, &fixture.token())
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_json_path!(response.body, "error", json!("Invalid request body"));
}

#[tokio::test]
async fn test_negative_servings_is_bad_request() {
    let fixture = TestFixture::new().await;
    let token = fixture.token();

    let mut body = recipe_json("Soup", "French", &["light"], &["Water"]);
    body["servings"] = json!(-4);
    let response = fixture.post_auth("/recipes", body.clone(), &token).await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
    assert!(!response.body["error"]
        .as_str()
        .unwrap()
        .contains("deserialize"));

    let id = fixture
        .create_recipe(recipe_json("Soup", "French", &["light"], &["Water"]))
        .await;
    let response = fixture
        .put_auth(&format!("/recipes/{}", id), body, &token)
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_json_path!(response.body, "error", json!("Invalid request body"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .post_raw("/recipes", r#"{"name": "Soup""#, &fixture.token())
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_json_path!(response.body, "error", json!("Malformed JSON body"));
}

#[tokio::test]
async fn test_update_and_delete() {
    let fixture = TestFixture::new().await;
    let token = fixture.token();
    let id = fixture
        .create_recipe(recipe_json("Soup", "French", &["light"], &["Water"]))
        .await;
    let path = format!("/recipes/{}", id);

    let response = fixture
        .put_auth(
            &path,
            recipe_json("Onion Soup", "French", &["dinner"], &["Onion"]),
            &token,
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "message", json!("Recipe updated"));

    let response = fixture.get(&path).await;
    assert_json_path!(response.body["recipe"], "name", json!("Onion Soup"));
    assert_json_path!(response.body["recipe"]["tags"][0], "name", json!("dinner"));

    let response = fixture.delete_auth(&path, &token).await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "message", json!("Recipe deleted"));

    assert_status!(fixture.get(&path).await, StatusCode::NOT_FOUND);
    assert_status!(fixture.delete_auth(&path, &token).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_recipe() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .put_auth(
            "/recipes/0123456789abcdef0123456789abcdef",
            recipe_json("Soup", "French", &["light"], &["Water"]),
            &fixture.token(),
        )
        .await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mutations_require_token() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/recipes", recipe_json("Soup", "French", &["light"], &["Water"]))
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
    assert!(response.body.is_null());

    let response = fixture
        .post_auth(
            "/recipes",
            recipe_json("Soup", "French", &["light"], &["Water"]),
            "garbage",
        )
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_open_access_allows_mutations() {
    let fixture = TestFixture::with_config(TestConfig::open_access()).await;
    let response = fixture
        .post("/recipes", recipe_json("Soup", "French", &["light"], &["Water"]))
        .await;
    assert_status!(response, StatusCode::CREATED);
}

#[tokio::test]
async fn test_lookup_listings() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/cuisines").await;
    assert_status!(response, StatusCode::OK);
    let cuisines = response.body["cuisines"].as_array().unwrap();
    assert!(cuisines.iter().any(|c| c["name"] == "Thai"));

    let response = fixture.get("/tags").await;
    assert_status!(response, StatusCode::OK);
    let tags = response.body["tags"].as_array().unwrap();
    assert!(tags.iter().any(|t| t["name"] == "quick"));
    assert!(tags[0]["_id"].is_string());
}

#[tokio::test]
async fn test_health_config_and_metrics() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/health").await;
    assert_json_path!(response.body, "status", json!("ok"));

    let response = fixture.get("/config").await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body["auth"], "method", json!("jwt"));
    assert_json_path!(response.body["auth"], "token_secret_configured", json!(true));
    assert!(!response.body.to_string().contains("integration-test-secret"));

    fixture
        .create_recipe(recipe_json("Soup", "French", &["light"], &["Water"]))
        .await;
    let response = fixture.get("/metrics").await;
    assert_status!(response, StatusCode::OK);
    let text = response.body.as_str().unwrap();
    assert!(text.contains("recipebook_http_requests_total"));
    assert!(text.contains("recipebook_recipes_stored"));
}
