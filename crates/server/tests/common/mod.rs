//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! over a temporary database, with mock AI services injected, enabling
//! end-to-end testing without a model provider.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use recipebook_core::{
    create_authenticator, create_token_service, seed_reference_data,
    testing::{MockQueryTranslator, MockRecipeGenerator},
    AiServices, AuthConfig, AuthMethod, Config, Database, DatabaseConfig, QueryTranslator,
    RecipeGenerator, ServerConfig, SqliteLookupStore,
};
use recipebook_server::state::AppState;

/// Re-export fixtures for test convenience
pub use recipebook_core::testing::fixtures;

const TOKEN_SECRET: &str = "integration-test-secret";

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_recipe_creation() {
///     let fixture = TestFixture::new().await;
///     let token = fixture.token();
///
///     let response = fixture.post_auth("/recipes", recipe_json("Soup"), &token).await;
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Shared application state
    pub state: Arc<AppState>,
    /// Mock translator - configure structured search results
    pub translator: Arc<MockQueryTranslator>,
    /// Mock generator - configure generated drafts
    pub generator: Arc<MockRecipeGenerator>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub auth_method: AuthMethod,
    /// Inject the mock AI services
    pub enable_ai: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            auth_method: AuthMethod::Jwt,
            enable_ai: true,
        }
    }
}

impl TestConfig {
    /// JWT auth without any AI provider.
    pub fn without_ai() -> Self {
        Self {
            enable_ai: false,
            ..Default::default()
        }
    }

    /// No authentication, mock AI enabled.
    pub fn open_access() -> Self {
        Self {
            auth_method: AuthMethod::None,
            ..Default::default()
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with JWT auth and mock AI.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let config = Config {
            auth: AuthConfig {
                method: test_config.auth_method,
                token_secret: Some(TOKEN_SECRET.to_string()),
                token_ttl_secs: 3600,
                password_cost: 4,
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: db_path.clone(),
                seed_reference_data: true,
            },
            ai: None,
        };

        let db = Arc::new(Database::open(&db_path).expect("Failed to open database"));
        seed_reference_data(&SqliteLookupStore::new(Arc::clone(&db)))
            .expect("Failed to seed reference data");

        let translator = Arc::new(MockQueryTranslator::new());
        let generator = Arc::new(MockRecipeGenerator::new());
        let ai = test_config.enable_ai.then(|| {
            AiServices::new(
                Arc::clone(&translator) as Arc<dyn QueryTranslator>,
                Arc::clone(&generator) as Arc<dyn RecipeGenerator>,
            )
        });

        let tokens = create_token_service(&config.auth);
        let authenticator = create_authenticator(&config.auth, tokens.clone())
            .expect("Failed to create authenticator");

        let state = Arc::new(AppState::new(
            config,
            db,
            Arc::from(authenticator),
            tokens,
            ai,
        ));

        let router = recipebook_server::api::create_router(Arc::clone(&state));

        Self {
            router,
            state,
            translator,
            generator,
            temp_dir,
        }
    }

    /// A valid access token for a test user.
    pub fn token(&self) -> String {
        self.state
            .tokens()
            .expect("token service configured")
            .issue("test-user", "test@example.com")
            .expect("Failed to issue token")
    }

    /// Create a recipe through the API and return its id.
    pub async fn create_recipe(&self, body: Value) -> String {
        let response = self.post_auth("/recipes", body, &self.token()).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "create failed: {}",
            response.body
        );
        response.body["recipeId"]
            .as_str()
            .expect("recipeId in response")
            .to_string()
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    /// Send a GET request with a bearer token.
    pub async fn get_auth(&self, path: &str, token: &str) -> TestResponse {
        self.request("GET", path, None, Some(token)).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), None).await
    }

    /// Send a POST request with JSON body and a bearer token.
    pub async fn post_auth(&self, path: &str, body: Value, token: &str) -> TestResponse {
        self.request("POST", path, Some(body), Some(token)).await
    }

    /// Send a PUT request with JSON body and a bearer token.
    pub async fn put_auth(&self, path: &str, body: Value, token: &str) -> TestResponse {
        self.request("PUT", path, Some(body), Some(token)).await
    }

    /// Send a DELETE request with a bearer token.
    pub async fn delete_auth(&self, path: &str, token: &str) -> TestResponse {
        self.request("DELETE", path, None, Some(token)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str, token: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            request_builder = request_builder.header("Authorization", format!("Bearer {}", token));
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).into()))
        };

        TestResponse { status, body }
    }
}

/// A complete create/update body.
pub fn recipe_json(name: &str, cuisine: &str, tags: &[&str], ingredients: &[&str]) -> Value {
    json!({
        "name": name,
        "cuisine": cuisine,
        "prepTime": 10,
        "cookTime": 20,
        "servings": 2,
        "ingredients": ingredients
            .iter()
            .map(|i| json!({ "name": i, "quantity": "1 cup" }))
            .collect::<Vec<_>>(),
        "instructions": ["Mix", "Cook"],
        "tags": tags,
    })
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
