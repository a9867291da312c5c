//! LLM-powered recipe generator.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use super::llm::{extract_json_object, CompletionRequest, LlmClient};
use super::traits::{AiError, RecipeGenerator};
use super::types::{canonical, RecipeDraft};
use crate::metrics;
use crate::recipe::{validate_recipe, NewRecipe, ValidationError};
use crate::store::LookupStore;

/// Configuration for the LLM recipe generator.
#[derive(Debug, Clone)]
pub struct LlmRecipeGeneratorConfig {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for LlmRecipeGeneratorConfig {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: 0.2,
        }
    }
}

pub struct LlmRecipeGenerator<C: LlmClient> {
    client: Arc<C>,
    config: LlmRecipeGeneratorConfig,
}

impl<C: LlmClient> LlmRecipeGenerator<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            config: LlmRecipeGeneratorConfig::default(),
        }
    }

    pub fn with_config(client: Arc<C>, config: LlmRecipeGeneratorConfig) -> Self {
        Self { client, config }
    }

    fn build_system_prompt(&self) -> String {
        r#"You are a recipe assistant. Turn the user's recipe text into a structured recipe.

Output a JSON object with these fields:
{
  "name": string,
  "cuisine": string,
  "prepTime": integer (minutes),
  "cookTime": integer (minutes),
  "servings": integer,
  "ingredients": [{"name": string, "quantity": string}],
  "instructions": string[],
  "tags": string[]
}

Rules:
- cuisine must be exactly one value from the available cuisines list
- tags must only use values from the available tags list
- Estimate times and servings when the text does not state them; they must be positive
- Each instruction is one step
- Return ONLY valid JSON, no explanations and no code fences"#
            .to_string()
    }

    fn build_user_prompt(&self, recipe_text: &str, cuisines: &[String], tags: &[String]) -> String {
        format!(
            "Recipe text:\n{}\n\nAvailable cuisines: {}\nAvailable tags: {}",
            recipe_text,
            cuisines.join(", "),
            tags.join(", ")
        )
    }

    /// JSON schema for the full recipe shape.
    pub fn response_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "cuisine": { "type": "string" },
                "prepTime": { "type": "integer" },
                "cookTime": { "type": "integer" },
                "servings": { "type": "integer" },
                "ingredients": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "quantity": { "type": "string" }
                        },
                        "required": ["name"]
                    }
                },
                "instructions": { "type": "array", "items": { "type": "string" } },
                "tags": { "type": "array", "items": { "type": "string" } }
            },
            "required": [
                "name", "cuisine", "prepTime", "cookTime", "servings",
                "ingredients", "instructions", "tags"
            ]
        })
    }

    fn parse_response(
        &self,
        text: &str,
        cuisines: &[String],
        tags: &[String],
    ) -> Result<RecipeDraft, AiError> {
        let mut draft: RecipeDraft = serde_json::from_str(extract_json_object(text))
            .map_err(|e| AiError::MalformedOutput(format!("{} - Response: {}", e, text)))?;

        draft.cuisine = canonical(&draft.cuisine, cuisines)
            .ok_or_else(|| AiError::UnknownValue {
                kind: "cuisine",
                value: draft.cuisine.clone(),
            })?
            .to_string();

        let mut resolved: Vec<String> = Vec::with_capacity(draft.tags.len());
        for tag in &draft.tags {
            let name = canonical(tag, tags).ok_or_else(|| AiError::UnknownValue {
                kind: "tag",
                value: tag.clone(),
            })?;
            if !resolved.iter().any(|t| t == name) {
                resolved.push(name.to_string());
            }
        }
        draft.tags = resolved;

        Ok(draft)
    }
}

#[async_trait]
impl<C: LlmClient + 'static> RecipeGenerator for LlmRecipeGenerator<C> {
    fn name(&self) -> &str {
        "llm"
    }

    async fn generate(
        &self,
        recipe_text: &str,
        cuisines: &[String],
        tags: &[String],
    ) -> Result<RecipeDraft, AiError> {
        let request = CompletionRequest::new(self.build_user_prompt(recipe_text, cuisines, tags))
            .with_system(self.build_system_prompt())
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature)
            .with_response_schema(Self::response_schema());

        let started = Instant::now();
        let result = match self.client.complete(request).await {
            Ok(response) => {
                metrics::record_llm_tokens(
                    self.client.provider(),
                    response.usage.input_tokens,
                    response.usage.output_tokens,
                );
                self.parse_response(&response.text, cuisines, tags)
            }
            Err(e) => Err(AiError::from(e)),
        };
        metrics::record_ai_request("generate", result.is_ok(), started.elapsed().as_secs_f64());

        match &result {
            Ok(draft) => debug!(name = %draft.name, cuisine = %draft.cuisine, "Generated recipe draft"),
            Err(e) => warn!(provider = self.client.provider(), error = %e, "Recipe generation failed"),
        }
        result
    }
}

/// Validate a generated draft for storage.
///
/// Missing or empty fields mean the model did not follow the schema and are
/// reported as malformed output; unresolvable references are reported as
/// unknown values.
pub fn validate_draft(
    draft: RecipeDraft,
    lookups: &dyn LookupStore,
) -> Result<NewRecipe, AiError> {
    validate_recipe(draft.into(), lookups).map_err(|e| match e {
        ValidationError::MissingFields(fields) => {
            AiError::MalformedOutput(format!("missing fields: {}", fields.join(", ")))
        }
        ValidationError::InvalidCuisine(value) => AiError::UnknownValue {
            kind: "cuisine",
            value,
        },
        ValidationError::InvalidTags(values) => AiError::UnknownValue {
            kind: "tag",
            value: values.join(", "),
        },
        ValidationError::Store(e) => AiError::Store(e),
    })
}
