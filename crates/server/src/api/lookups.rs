//! Reference data listings.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use recipebook_core::{Cuisine, Tag};

use super::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CuisinesResponse {
    pub cuisines: Vec<Cuisine>,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<Tag>,
}

pub async fn list_cuisines(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CuisinesResponse>, ApiError> {
    Ok(Json(CuisinesResponse {
        cuisines: state.lookups().cuisines()?,
    }))
}

pub async fn list_tags(State(state): State<Arc<AppState>>) -> Result<Json<TagsResponse>, ApiError> {
    Ok(Json(TagsResponse {
        tags: state.lookups().tags()?,
    }))
}
