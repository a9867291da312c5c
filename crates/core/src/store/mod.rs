//! Document store for recipes, reference data and users.
//!
//! Documents live in SQLite as JSON text. A single [`Database`] handle is
//! opened by the entry point and shared by every store; closing it makes all
//! further store operations fail with [`StoreError::Closed`].

mod database;
mod lookups;
mod recipes;
mod seed;
mod users;

pub use database::Database;
pub use lookups::SqliteLookupStore;
pub use recipes::SqliteRecipeStore;
pub use seed::{seed_reference_data, SeedReport, DEFAULT_CUISINES, DEFAULT_TAGS};
pub use users::{SqliteUserStore, User};

use thiserror::Error;

use crate::criteria::Filter;
use crate::recipe::{Cuisine, DocumentId, NewRecipe, Recipe, Tag};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Corrupt document {id}: {reason}")]
    Corrupt { id: String, reason: String },

    #[error("Database is closed")]
    Closed,
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// Storage for recipe documents.
pub trait RecipeStore: Send + Sync {
    /// All recipes matching the filter, ordered by name.
    fn find(&self, filter: &Filter) -> Result<Vec<Recipe>, StoreError>;

    fn get(&self, id: &DocumentId) -> Result<Option<Recipe>, StoreError>;

    /// Store a new recipe under a freshly generated id.
    fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError>;

    /// Replace the body of an existing recipe. Returns `None` when no recipe has this id.
    fn update(&self, id: &DocumentId, recipe: NewRecipe) -> Result<Option<Recipe>, StoreError>;

    /// Returns `false` when no recipe has this id.
    fn delete(&self, id: &DocumentId) -> Result<bool, StoreError>;

    fn count(&self) -> Result<u64, StoreError>;

    /// Every distinct ingredient name used by any stored recipe, sorted.
    fn distinct_ingredient_names(&self) -> Result<Vec<String>, StoreError>;
}

/// Storage for the cuisine and tag reference collections.
pub trait LookupStore: Send + Sync {
    /// Exact, case-sensitive lookup.
    fn cuisine_by_name(&self, name: &str) -> Result<Option<Cuisine>, StoreError>;

    /// Tags whose names appear in `names`. Unknown names are skipped.
    fn tags_by_names(&self, names: &[String]) -> Result<Vec<Tag>, StoreError>;

    fn cuisines(&self) -> Result<Vec<Cuisine>, StoreError>;

    fn tags(&self) -> Result<Vec<Tag>, StoreError>;

    /// Insert a cuisine, or return the existing one with the same name.
    fn add_cuisine(&self, name: &str) -> Result<Cuisine, StoreError>;

    /// Insert a tag, or return the existing one with the same name.
    fn add_tag(&self, name: &str) -> Result<Tag, StoreError>;
}

/// Storage for registered users.
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] if the email is already registered.
    fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}
