//! Recipe API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use recipebook_core::metrics::RECIPE_MUTATIONS;
use recipebook_core::{
    build_filter, validate_recipe, DocumentId, Recipe, RecipeCandidate, RecipeSummary,
    SearchInput,
};

use super::error::ApiError;
use super::extract::ApiJson;
use super::middleware::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for searching recipes. List values are comma-delimited.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub tags: Option<String>,
    pub ingredients: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecipeListResponse {
    pub recipes: Vec<RecipeSummary>,
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub recipe: Recipe,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCreatedResponse {
    pub message: String,
    pub recipe_id: DocumentId,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Search recipes by name substring, tags (any) and ingredients (all).
pub async fn search_recipes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<RecipeListResponse>, ApiError> {
    let input = SearchInput::from_delimited(
        params.name.as_deref(),
        params.tags.as_deref(),
        params.ingredients.as_deref(),
    );
    let filter = build_filter(&input);
    debug!(query = %filter.to_query_document(), "Searching recipes");

    let recipes = state.recipes().find(&filter)?;
    Ok(Json(RecipeListResponse {
        recipes: recipes.into_iter().map(RecipeSummary::from).collect(),
    }))
}

pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let id: DocumentId = id.parse()?;
    let recipe = state
        .recipes()
        .get(&id)?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;
    Ok(Json(RecipeResponse { recipe }))
}

pub async fn create_recipe(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ApiJson(body): ApiJson<RecipeCandidate>,
) -> Result<(StatusCode, Json<RecipeCreatedResponse>), ApiError> {
    let recipe = validate_recipe(body, state.lookups())?;
    let created = state.recipes().insert(recipe)?;
    RECIPE_MUTATIONS.with_label_values(&["create"]).inc();
    info!(recipe_id = %created.id, user = %user, "Recipe created");

    Ok((
        StatusCode::CREATED,
        Json(RecipeCreatedResponse {
            message: "Recipe created".to_string(),
            recipe_id: created.id,
        }),
    ))
}

/// Replace a recipe. The body is validated like a create.
pub async fn update_recipe(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<RecipeCandidate>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: DocumentId = id.parse()?;
    let recipe = validate_recipe(body, state.lookups())?;
    state
        .recipes()
        .update(&id, recipe)?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;
    RECIPE_MUTATIONS.with_label_values(&["update"]).inc();
    info!(recipe_id = %id, user = %user, "Recipe updated");

    Ok(MessageResponse::new("Recipe updated"))
}

pub async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: DocumentId = id.parse()?;
    if !state.recipes().delete(&id)? {
        return Err(ApiError::NotFound("Recipe not found".to_string()));
    }
    RECIPE_MUTATIONS.with_label_values(&["delete"]).inc();
    info!(recipe_id = %id, user = %user, "Recipe deleted");

    Ok(MessageResponse::new("Recipe deleted"))
}
