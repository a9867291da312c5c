//! AI-assisted search and recipe generation.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use recipebook_core::metrics::RECIPE_MUTATIONS;
use recipebook_core::{
    build_filter, validate_draft, AiServices, DocumentId, RecipeSummary, SearchInput,
    StructuredQuery, Vocabulary,
};

use super::error::ApiError;
use super::extract::ApiJson;
use super::middleware::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AiSearchParams {
    /// Free-text query.
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSearchResponse {
    pub recipes: Vec<RecipeSummary>,
    /// The structured parameters the query was translated into.
    pub search_params: StructuredQuery,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipeBody {
    pub recipe_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipeResponse {
    pub recipe_id: DocumentId,
}

// ============================================================================
// Handlers
// ============================================================================

fn ai_services(state: &AppState) -> Result<&AiServices, ApiError> {
    state
        .ai()
        .ok_or_else(|| ApiError::ServiceUnavailable("AI service is not configured".to_string()))
}

fn vocabulary(state: &AppState) -> Result<Vocabulary, ApiError> {
    let lookups = state.lookups();
    Ok(Vocabulary {
        tags: lookups.tags()?.into_iter().map(|t| t.name).collect(),
        cuisines: lookups.cuisines()?.into_iter().map(|c| c.name).collect(),
        ingredients: state.recipes().distinct_ingredient_names()?,
    })
}

/// Translate a free-text query and run the resulting search.
pub async fn search_recipes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AiSearchParams>,
) -> Result<Json<AiSearchResponse>, ApiError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing query parameter q".to_string()))?;
    let ai = ai_services(&state)?;

    let search_params = ai.translator.translate(query, &vocabulary(&state)?).await?;
    let filter = build_filter(&SearchInput::from(search_params.clone()));
    debug!(query = %filter.to_query_document(), "Searching recipes from translated query");

    let recipes = state.recipes().find(&filter)?;
    Ok(Json(AiSearchResponse {
        recipes: recipes.into_iter().map(RecipeSummary::from).collect(),
        search_params,
    }))
}

/// Structure free recipe text into a recipe and store it.
pub async fn generate_recipe(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ApiJson(body): ApiJson<GenerateRecipeBody>,
) -> Result<(StatusCode, Json<GeneratedRecipeResponse>), ApiError> {
    let text = body.recipe_text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Missing fields".to_string()));
    }
    let ai = ai_services(&state)?;

    let vocabulary = vocabulary(&state)?;
    let draft = ai
        .generator
        .generate(text, &vocabulary.cuisines, &vocabulary.tags)
        .await?;
    let recipe = validate_draft(draft, state.lookups())?;
    let created = state.recipes().insert(recipe)?;
    RECIPE_MUTATIONS.with_label_values(&["generate"]).inc();
    info!(recipe_id = %created.id, user = %user, "Recipe generated");

    Ok((
        StatusCode::CREATED,
        Json(GeneratedRecipeResponse {
            recipe_id: created.id,
        }),
    ))
}
