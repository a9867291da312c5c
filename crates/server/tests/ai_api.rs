//! AI search and recipe generation endpoints with mock AI services.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use recipebook_core::ai::LlmError;
use recipebook_core::{AiError, StructuredQuery};

use common::{fixtures, recipe_json, TestConfig, TestFixture};

async fn populated() -> TestFixture {
    let fixture = TestFixture::new().await;
    fixture
        .create_recipe(recipe_json(
            "Tom Yum",
            "Thai",
            &["spicy"],
            &["Shrimp", "Lemongrass"],
        ))
        .await;
    fixture
        .create_recipe(recipe_json(
            "Kung Pao Chicken",
            "Chinese",
            &["spicy", "popular"],
            &["Chicken Thigh", "Peanuts"],
        ))
        .await;
    fixture
        .create_recipe(recipe_json("Ratatouille", "French", &["vegan"], &["Zucchini"]))
        .await;
    fixture
}

#[tokio::test]
async fn test_ai_search_runs_translated_query() {
    let fixture = populated().await;
    fixture
        .translator
        .set_result(StructuredQuery {
            cuisines: vec!["Thai".to_string(), "Chinese".to_string()],
            tags: vec!["spicy".to_string()],
            ingredients: vec!["chicken".to_string()],
        })
        .await;

    let response = fixture.get("/ai/recipes?q=spicy%20asian%20chicken").await;
    assert_status!(response, StatusCode::OK);

    let recipes = response.body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_json_path!(recipes[0], "name", json!("Kung Pao Chicken"));
    assert_json_path!(
        response.body["searchParams"],
        "cuisines",
        json!(["Thai", "Chinese"])
    );

    let recorded = fixture.translator.recorded_translations().await;
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].query, "spicy asian chicken");
    assert!(recorded[0].vocabulary.cuisines.contains(&"Thai".to_string()));
    assert!(recorded[0].vocabulary.tags.contains(&"vegan".to_string()));
    assert!(recorded[0]
        .vocabulary
        .ingredients
        .contains(&"Lemongrass".to_string()));
}

#[tokio::test]
async fn test_ai_search_unconstrained_returns_everything() {
    let fixture = populated().await;
    let response = fixture.get("/ai/recipes?q=anything").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["recipes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_ai_search_requires_query() {
    let fixture = TestFixture::new().await;

    assert_status!(fixture.get("/ai/recipes").await, StatusCode::BAD_REQUEST);
    assert_status!(fixture.get("/ai/recipes?q=%20").await, StatusCode::BAD_REQUEST);
    assert!(fixture.translator.recorded_translations().await.is_empty());
}

#[tokio::test]
async fn test_ai_search_error_mapping() {
    let fixture = TestFixture::new().await;

    fixture
        .translator
        .set_next_error(AiError::UnknownValue {
            kind: "cuisine",
            value: "Martian".to_string(),
        })
        .await;
    let response = fixture.get("/ai/recipes?q=martian%20food").await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert_json_path!(
        response.body,
        "error",
        json!("AI tried to use a cuisine that doesn't exist")
    );

    fixture
        .translator
        .set_next_error(AiError::MalformedOutput("not json".to_string()))
        .await;
    let response = fixture.get("/ai/recipes?q=soup").await;
    assert_status!(response, StatusCode::BAD_GATEWAY);

    fixture
        .translator
        .set_next_error(AiError::Llm(LlmError::Http("connection refused".to_string())))
        .await;
    let response = fixture.get("/ai/recipes?q=soup").await;
    assert_status!(response, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_ai_unavailable_without_provider() {
    let fixture = TestFixture::with_config(TestConfig::without_ai()).await;

    let response = fixture.get("/ai/recipes?q=soup").await;
    assert_status!(response, StatusCode::SERVICE_UNAVAILABLE);

    let response = fixture
        .post_auth(
            "/ai/recipes",
            json!({ "recipeText": "boil water" }),
            &fixture.token(),
        )
        .await;
    assert_status!(response, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_generate_recipe_stores_validated_draft() {
    let fixture = TestFixture::new().await;
    fixture
        .generator
        .set_draft(fixtures::recipe_draft("Tom Kha", "Thai", &["spicy", "healthy"]))
        .await;

    let response = fixture
        .post_auth(
            "/ai/recipes",
            json!({ "recipeText": "Simmer coconut milk with lemongrass..." }),
            &fixture.token(),
        )
        .await;
    assert_status!(response, StatusCode::CREATED);
    let id = response.body["recipeId"].as_str().unwrap().to_string();

    let response = fixture.get(&format!("/recipes/{}", id)).await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body["recipe"], "name", json!("Tom Kha"));
    assert_json_path!(response.body["recipe"]["cuisine"], "name", json!("Thai"));
    assert!(response.body["recipe"]["cuisine"]["_id"].is_string());

    assert_eq!(
        fixture.generator.recorded_texts().await,
        vec!["Simmer coconut milk with lemongrass..."]
    );
}

#[tokio::test]
async fn test_generate_recipe_with_unknown_tag() {
    let fixture = TestFixture::new().await;
    fixture
        .generator
        .set_draft(fixtures::recipe_draft("Tom Kha", "Thai", &["galactic"]))
        .await;

    let response = fixture
        .post_auth(
            "/ai/recipes",
            json!({ "recipeText": "soup" }),
            &fixture.token(),
        )
        .await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert_json_path!(
        response.body,
        "error",
        json!("AI tried to use a tag that doesn't exist")
    );
    assert_json_path!(fixture.get("/recipes").await.body, "recipes", json!([]));
}

#[tokio::test]
async fn test_generate_recipe_with_incomplete_draft() {
    let fixture = TestFixture::new().await;
    let mut draft = fixtures::recipe_draft("Tom Kha", "Thai", &["spicy"]);
    draft.servings = 0;
    fixture.generator.set_draft(draft).await;

    let response = fixture
        .post_auth(
            "/ai/recipes",
            json!({ "recipeText": "soup" }),
            &fixture.token(),
        )
        .await;
    assert_status!(response, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_generate_recipe_requires_auth_and_text() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post("/ai/recipes", json!({ "recipeText": "soup" }))
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);

    let response = fixture
        .post_auth("/ai/recipes", json!({ "recipeText": "  " }), &fixture.token())
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = fixture
        .post_auth("/ai/recipes", json!({ "recipeText": 7 }), &fixture.token())
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_json_path!(response.body, "error", json!("Invalid request body"));
    assert!(fixture.generator.recorded_texts().await.is_empty());
}
