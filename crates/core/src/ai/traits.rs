//! Traits for the AI components.

use async_trait::async_trait;
use thiserror::Error;

use super::llm::LlmError;
use super::types::{RecipeDraft, StructuredQuery, Vocabulary};
use crate::store::StoreError;

/// Errors that can occur during AI operations.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    /// The model used a cuisine or tag that does not exist.
    #[error("AI tried to use a {kind} that doesn't exist")]
    UnknownValue { kind: &'static str, value: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Translates a free-text search into structured parameters.
#[async_trait]
pub trait QueryTranslator: Send + Sync {
    /// Name of this translator for logging.
    fn name(&self) -> &str;

    /// Cuisines and tags in the result are drawn from `vocabulary`, spelled
    /// as stored.
    async fn translate(
        &self,
        query: &str,
        vocabulary: &Vocabulary,
    ) -> Result<StructuredQuery, AiError>;
}

/// Drafts a structured recipe from free text.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Name of this generator for logging.
    fn name(&self) -> &str;

    async fn generate(
        &self,
        recipe_text: &str,
        cuisines: &[String],
        tags: &[String],
    ) -> Result<RecipeDraft, AiError>;
}
