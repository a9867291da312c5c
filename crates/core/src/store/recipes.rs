//! SQLite-backed recipe store.

use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde_json::Value;
use tracing::debug;

use super::{Database, RecipeStore, StoreError};
use crate::criteria::Filter;
use crate::recipe::{DocumentId, NewRecipe, Recipe};

/// Recipe documents stored as JSON, filtered in process.
pub struct SqliteRecipeStore {
    db: Arc<Database>,
}

impl SqliteRecipeStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn parse_document(id: &str, json: &str) -> Result<Value, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Corrupt {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }

    fn to_recipe(id: &str, document: Value) -> Result<Recipe, StoreError> {
        serde_json::from_value(document).map_err(|e| StoreError::Corrupt {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }

    fn serialize(recipe: &Recipe) -> Result<String, StoreError> {
        serde_json::to_string(recipe).map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl RecipeStore for SqliteRecipeStore {
    fn find(&self, filter: &Filter) -> Result<Vec<Recipe>, StoreError> {
        let rows = self.db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, document FROM recipes ORDER BY name, id")?;
            let rows = stmt
                .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;

        let scanned = rows.len();
        let mut recipes = Vec::new();
        for (id, json) in rows {
            let document = Self::parse_document(&id, &json)?;
            if filter.matches(&document) {
                recipes.push(Self::to_recipe(&id, document)?);
            }
        }

        debug!(scanned, matched = recipes.len(), "Recipe filter evaluated");
        Ok(recipes)
    }

    fn get(&self, id: &DocumentId) -> Result<Option<Recipe>, StoreError> {
        let json = self.db.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT document FROM recipes WHERE id = ?",
                    params![id.as_str()],
                    |row| row.get::<_, String>(0),
                )
                .optional()?)
        })?;

        json.map(|json| {
            let document = Self::parse_document(id.as_str(), &json)?;
            Self::to_recipe(id.as_str(), document)
        })
        .transpose()
    }

    fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let recipe = Recipe::from_new(DocumentId::generate(), recipe);
        let document = Self::serialize(&recipe)?;
        let now = Utc::now().to_rfc3339();

        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO recipes (id, name, document, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
                params![recipe.id.as_str(), recipe.name, document, now, now],
            )?;
            Ok(())
        })?;

        Ok(recipe)
    }

    fn update(&self, id: &DocumentId, recipe: NewRecipe) -> Result<Option<Recipe>, StoreError> {
        let recipe = Recipe::from_new(id.clone(), recipe);
        let document = Self::serialize(&recipe)?;
        let now = Utc::now().to_rfc3339();

        let changed = self.db.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE recipes SET name = ?, document = ?, updated_at = ? WHERE id = ?",
                params![recipe.name, document, now, id.as_str()],
            )?)
        })?;

        Ok((changed > 0).then_some(recipe))
    }

    fn delete(&self, id: &DocumentId) -> Result<bool, StoreError> {
        let changed = self.db.with_conn(|conn| {
            Ok(conn.execute("DELETE FROM recipes WHERE id = ?", params![id.as_str()])?)
        })?;
        Ok(changed > 0)
    }

    fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = self.db.with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?)
        })?;
        Ok(count as u64)
    }

    fn distinct_ingredient_names(&self) -> Result<Vec<String>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT DISTINCT json_extract(ingredient.value, '$.name') AS ingredient_name
                FROM recipes, json_each(recipes.document, '$.ingredients') AS ingredient
                WHERE json_type(ingredient.value, '$.name') = 'text'
                ORDER BY ingredient_name
                "#,
            )?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(names)
        })
    }
}
