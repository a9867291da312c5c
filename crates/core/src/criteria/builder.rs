//! Translation of search parameters into a [`Filter`].

use serde::{Deserialize, Serialize};

use super::filter::{Condition, Filter, Pattern};

pub const FIELD_NAME: &str = "name";
pub const FIELD_TAG_NAMES: &str = "tags.name";
pub const FIELD_INGREDIENT_NAMES: &str = "ingredients.name";
pub const FIELD_CUISINE_NAME: &str = "cuisine.name";

/// Optional recipe search inputs. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub cuisines: Option<Vec<String>>,
}

impl SearchInput {
    /// Build from raw query-string values, where list fields are comma-delimited.
    pub fn from_delimited(
        name: Option<&str>,
        tags: Option<&str>,
        ingredients: Option<&str>,
    ) -> Self {
        Self {
            name: name.map(str::to_string),
            tags: tags.map(split_list),
            ingredients: ingredients.map(split_list),
            cuisines: None,
        }
    }
}

/// Split a comma-delimited list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the recipe filter for a search.
///
/// - `name`: case-insensitive substring of the recipe name
/// - `tags`: any tag name is one of the list
/// - `ingredients`: each entry is a substring of some ingredient name
/// - `cuisines`: the cuisine name is one of the list
pub fn build_filter(input: &SearchInput) -> Filter {
    let mut filter = Filter::new();

    if let Some(name) = input.name.as_deref().filter(|n| !n.is_empty()) {
        filter.insert(FIELD_NAME, Condition::Matches(Pattern::new(name)));
    }

    if let Some(tags) = non_empty(&input.tags) {
        filter.insert(FIELD_TAG_NAMES, Condition::In(tags.to_vec()));
    }

    if let Some(ingredients) = non_empty(&input.ingredients) {
        let patterns = ingredients.iter().map(Pattern::new).collect();
        filter.insert(FIELD_INGREDIENT_NAMES, Condition::All(patterns));
    }

    if let Some(cuisines) = non_empty(&input.cuisines) {
        filter.insert(FIELD_CUISINE_NAME, Condition::In(cuisines.to_vec()));
    }

    filter
}

fn non_empty(list: &Option<Vec<String>>) -> Option<&[String]> {
    list.as_deref().filter(|l| !l.is_empty())
}
