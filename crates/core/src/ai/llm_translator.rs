//! LLM-powered query translator.
//!
//! Prompts a language model with the user's free-text query and the known
//! cuisines, tags and ingredients, and asks for structured search
//! parameters under a JSON response schema.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use super::llm::{extract_json_object, CompletionRequest, LlmClient};
use super::traits::{AiError, QueryTranslator};
use super::types::{canonical, StructuredQuery, Vocabulary};
use crate::metrics;

/// Configuration for the LLM query translator.
#[derive(Debug, Clone)]
pub struct LlmQueryTranslatorConfig {
    /// Maximum tokens for the LLM response.
    pub max_tokens: u32,
    /// Temperature for generation.
    pub temperature: f32,
}

impl Default for LlmQueryTranslatorConfig {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            temperature: 0.0,
        }
    }
}

/// LLM-powered query translator.
///
/// Generic over the LLM client type to support different backends
/// (Gemini, Ollama).
pub struct LlmQueryTranslator<C: LlmClient> {
    client: Arc<C>,
    config: LlmQueryTranslatorConfig,
}

impl<C: LlmClient> LlmQueryTranslator<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            config: LlmQueryTranslatorConfig::default(),
        }
    }

    pub fn with_config(client: Arc<C>, config: LlmQueryTranslatorConfig) -> Self {
        Self { client, config }
    }

    fn build_system_prompt(&self) -> String {
        r#"You are a search query converter. Convert the user's natural language query into a structured search format.

Output a JSON object with exactly these fields, using empty arrays when no values apply:
{
  "cuisines": string[],
  "tags": string[],
  "ingredients": string[]
}

- tags: matching tags (OR logic, a recipe has ANY of them)
- cuisines: matching cuisines (OR logic, a recipe has ANY of them)
- ingredients: ingredients (AND logic, a recipe must have ALL of them)

Rules:
- Only use tags from the available tags list
- Only use cuisines from the available cuisines list
- For ingredients, extract and infer any food items mentioned
- Keep ingredients lowercase
- Apply semantic understanding: "meat" can mean chicken, beef or duck
- If the query mentions a cuisine, tag or ingredient, use it or the closest match from the available lists
- Infer tags from cuisines and ingredients, and cuisines from tags
- Return ONLY valid JSON, no explanations and no code fences

Example input: "italian pasta with chicken and garlic"
Example output: {"cuisines":["Italian"],"tags":[],"ingredients":["chicken","garlic"]}

Example input: "southeast asian recipes"
Example output: {"cuisines":["Thai","Vietnamese"],"tags":[],"ingredients":[]}

Example input: "quick no meat dinner"
Example output: {"cuisines":[],"tags":["quick","easy","vegetarian","vegan","dinner"],"ingredients":[]}

Example input: "healthy thai soup with coconut and lemongrass"
Example output: {"cuisines":["Thai"],"tags":["healthy","light"],"ingredients":["coconut","lemongrass"]}"#
            .to_string()
    }

    fn build_user_prompt(&self, query: &str, vocabulary: &Vocabulary) -> String {
        format!(
            "User's query: {}\nAvailable tags: {}\nAvailable cuisines: {}\nAvailable ingredients: {}",
            query,
            vocabulary.tags.join(", "),
            vocabulary.cuisines.join(", "),
            vocabulary.ingredients.join(", ")
        )
    }

    /// JSON schema requiring exactly the three list fields.
    pub fn response_schema() -> Value {
        let list = json!({ "type": "array", "items": { "type": "string" } });
        json!({
            "type": "object",
            "properties": {
                "ingredients": list,
                "tags": list,
                "cuisines": list
            },
            "required": ["ingredients", "tags", "cuisines"]
        })
    }

    /// Parse the model output and constrain it to the vocabulary.
    fn parse_response(
        &self,
        text: &str,
        vocabulary: &Vocabulary,
    ) -> Result<StructuredQuery, AiError> {
        let parsed: StructuredQuery = serde_json::from_str(extract_json_object(text))
            .map_err(|e| AiError::MalformedOutput(format!("{} - Response: {}", e, text)))?;

        Ok(StructuredQuery {
            cuisines: restrict(parsed.cuisines, &vocabulary.cuisines, "cuisine")?,
            tags: restrict(parsed.tags, &vocabulary.tags, "tag")?,
            ingredients: normalize_ingredients(parsed.ingredients),
        })
    }
}

/// Map each value onto its stored spelling, rejecting anything unknown.
fn restrict(
    values: Vec<String>,
    allowed: &[String],
    kind: &'static str,
) -> Result<Vec<String>, AiError> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let Some(name) = canonical(&value, allowed) else {
            return Err(AiError::UnknownValue { kind, value });
        };
        if !out.iter().any(|existing| existing == name) {
            out.push(name.to_string());
        }
    }
    Ok(out)
}

fn normalize_ingredients(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim().to_lowercase();
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[async_trait]
impl<C: LlmClient + 'static> QueryTranslator for LlmQueryTranslator<C> {
    fn name(&self) -> &str {
        "llm"
    }

    async fn translate(
        &self,
        query: &str,
        vocabulary: &Vocabulary,
    ) -> Result<StructuredQuery, AiError> {
        let request = CompletionRequest::new(self.build_user_prompt(query, vocabulary))
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
                self.parse_response(&response.text, vocabulary)
            }
            Err(e) => Err(AiError::from(e)),
        };
        metrics::record_ai_request("translate", result.is_ok(), started.elapsed().as_secs_f64());

        match &result {
            Ok(parsed) => debug!(
                provider = self.client.provider(),
                model = self.client.model(),
                ?parsed,
                "Translated search query"
            ),
            Err(e) => warn!(provider = self.client.provider(), error = %e, "Query translation failed"),
        }
        result
    }
}
