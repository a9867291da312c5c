//! Recipe documents and payload validation.

mod types;
mod validate;

pub use types::{
    Cuisine, DocumentId, Ingredient, InvalidDocumentId, NewRecipe, Recipe, RecipeCandidate,
    RecipeSummary, Tag,
};
pub use validate::{validate_recipe, ValidationError};
