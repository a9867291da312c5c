//! Recipe payload validation.

use thiserror::Error;

use super::types::{NewRecipe, RecipeCandidate};
use crate::store::{LookupStore, StoreError};

#[derive(Debug, Error)]
pub enum ValidationError {
    /// Names of the absent or empty fields, in declaration order.
    #[error("Missing fields")]
    MissingFields(Vec<&'static str>),

    #[error("Invalid cuisine")]
    InvalidCuisine(String),

    /// The tag names that could not be resolved.
    #[error("One or more tags is invalid")]
    InvalidTags(Vec<String>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ValidationError {
    /// Whether the caller sent a bad payload, as opposed to the lookup failing.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ValidationError::Store(_))
    }
}

/// Validate a create/update payload and expand its cuisine and tags.
///
/// Empty strings and zero numbers count as missing. The list fields only
/// need to be present. Duplicate tag names are collapsed before lookup.
pub fn validate_recipe(
    candidate: RecipeCandidate,
    lookups: &dyn LookupStore,
) -> Result<NewRecipe, ValidationError> {
    let mut missing = Vec::new();

    let name = non_blank(candidate.name);
    if name.is_none() {
        missing.push("name");
    }
    let cuisine = non_blank(candidate.cuisine);
    if cuisine.is_none() {
        missing.push("cuisine");
    }
    let prep_time = candidate.prep_time.filter(|&v| v > 0);
    if prep_time.is_none() {
        missing.push("prepTime");
    }
    let cook_time = candidate.cook_time.filter(|&v| v > 0);
    if cook_time.is_none() {
        missing.push("cookTime");
    }
    let servings = candidate.servings.filter(|&v| v > 0);
    if servings.is_none() {
        missing.push("servings");
    }
    if candidate.ingredients.is_none() {
        missing.push("ingredients");
    }
    if candidate.instructions.is_none() {
        missing.push("instructions");
    }
    if candidate.tags.is_none() {
        missing.push("tags");
    }

    let (
        Some(name),
        Some(cuisine),
        Some(prep_time),
        Some(cook_time),
        Some(servings),
        Some(ingredients),
        Some(instructions),
        Some(tag_names),
    ) = (
        name,
        cuisine,
        prep_time,
        cook_time,
        servings,
        candidate.ingredients,
        candidate.instructions,
        candidate.tags,
    )
    else {
        return Err(ValidationError::MissingFields(missing));
    };

    let cuisine = lookups
        .cuisine_by_name(&cuisine)?
        .ok_or(ValidationError::InvalidCuisine(cuisine))?;

    let mut unique_names: Vec<String> = Vec::with_capacity(tag_names.len());
    for tag in tag_names {
        if !unique_names.contains(&tag) {
            unique_names.push(tag);
        }
    }

    let tags = lookups.tags_by_names(&unique_names)?;
    if tags.len() != unique_names.len() {
        let unknown = unique_names
            .into_iter()
            .filter(|n| !tags.iter().any(|t| &t.name == n))
            .collect();
        return Err(ValidationError::InvalidTags(unknown));
    }

    Ok(NewRecipe {
        name,
        cuisine,
        prep_time,
        cook_time,
        servings,
        ingredients,
        instructions,
        tags,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
