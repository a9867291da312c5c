//! Types exchanged with the AI components.

use serde::{Deserialize, Serialize};

use crate::criteria::SearchInput;
use crate::recipe::{Ingredient, RecipeCandidate};

/// The values a translation may draw on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub tags: Vec<String>,
    pub cuisines: Vec<String>,
    pub ingredients: Vec<String>,
}

/// Structured search parameters produced from a free-text query.
///
/// Exactly these three keys are accepted when parsing model output. An
/// empty list places no constraint on its field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuredQuery {
    pub cuisines: Vec<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
}

impl StructuredQuery {
    pub fn is_unconstrained(&self) -> bool {
        self.cuisines.is_empty() && self.tags.is_empty() && self.ingredients.is_empty()
    }
}

impl From<StructuredQuery> for SearchInput {
    fn from(query: StructuredQuery) -> Self {
        SearchInput {
            name: None,
            tags: Some(query.tags),
            ingredients: Some(query.ingredients),
            cuisines: Some(query.cuisines),
        }
    }
}

/// Case-insensitive lookup of `value` in `allowed`, returning the stored spelling.
pub(crate) fn canonical<'a>(value: &str, allowed: &'a [String]) -> Option<&'a str> {
    let folded = value.trim().to_lowercase();
    allowed
        .iter()
        .find(|candidate| candidate.to_lowercase() == folded)
        .map(String::as_str)
}

/// A recipe drafted by the model from free text, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    pub cuisine: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
}

impl From<RecipeDraft> for RecipeCandidate {
    fn from(draft: RecipeDraft) -> Self {
        RecipeCandidate {
            name: Some(draft.name),
            cuisine: Some(draft.cuisine),
            prep_time: Some(draft.prep_time),
            cook_time: Some(draft.cook_time),
            servings: Some(draft.servings),
            ingredients: Some(draft.ingredients),
            instructions: Some(draft.instructions),
            tags: Some(draft.tags),
        }
    }
}
