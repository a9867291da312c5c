//! Testing utilities and mock implementations.
//!
//! Mocks for the AI seams plus fixtures for building recipes and seeded
//! stores, so the HTTP surface can be exercised without a model or a file
//! on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use recipebook_core::testing::{fixtures, MockQueryTranslator};
//!
//! let stores = fixtures::seeded_stores();
//! let translator = MockQueryTranslator::new();
//! translator.set_result(StructuredQuery { cuisines: vec!["Thai".into()], ..Default::default() }).await;
//! ```

mod mock_ai;
mod mock_llm;

pub use mock_ai::{MockQueryTranslator, MockRecipeGenerator, RecordedTranslation};
pub use mock_llm::MockLlmClient;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::sync::Arc;

    use crate::ai::RecipeDraft;
    use crate::recipe::{Ingredient, RecipeCandidate};
    use crate::store::{
        seed_reference_data, Database, SqliteLookupStore, SqliteRecipeStore, SqliteUserStore,
    };

    /// In-memory stores sharing one database.
    pub struct TestStores {
        pub db: Arc<Database>,
        pub recipes: Arc<SqliteRecipeStore>,
        pub lookups: Arc<SqliteLookupStore>,
        pub users: Arc<SqliteUserStore>,
    }

    /// Stores over a fresh in-memory database with no reference data.
    pub fn empty_stores() -> TestStores {
        let db = Arc::new(Database::in_memory().expect("in-memory database"));
        TestStores {
            recipes: Arc::new(SqliteRecipeStore::new(Arc::clone(&db))),
            lookups: Arc::new(SqliteLookupStore::new(Arc::clone(&db))),
            users: Arc::new(SqliteUserStore::new(Arc::clone(&db))),
            db,
        }
    }

    /// Stores with the default cuisines and tags.
    pub fn seeded_stores() -> TestStores {
        let stores = empty_stores();
        seed_reference_data(stores.lookups.as_ref()).expect("seed reference data");
        stores
    }

    /// A complete create payload.
    pub fn recipe_candidate(
        name: &str,
        cuisine: &str,
        tags: &[&str],
        ingredients: &[&str],
    ) -> RecipeCandidate {
        RecipeCandidate {
            name: Some(name.to_string()),
            cuisine: Some(cuisine.to_string()),
            prep_time: Some(15),
            cook_time: Some(30),
            servings: Some(4),
            ingredients: Some(ingredients.iter().map(|i| Ingredient::named(*i)).collect()),
            instructions: Some(vec![
                "Prepare the ingredients".to_string(),
                "Cook everything".to_string(),
            ]),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        }
    }

    /// A complete generated draft.
    pub fn recipe_draft(name: &str, cuisine: &str, tags: &[&str]) -> RecipeDraft {
        RecipeDraft {
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            prep_time: 10,
            cook_time: 20,
            servings: 2,
            ingredients: vec![Ingredient {
                name: "lemongrass".to_string(),
                quantity: Some("2 stalks".to_string()),
            }],
            instructions: vec!["Simmer".to_string()],
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}
