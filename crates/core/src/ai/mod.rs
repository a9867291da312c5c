//! AI integration: natural-language search translation and recipe drafting.
//!
//! Both components sit on an [`LlmClient`], which talks to Gemini or a
//! local Ollama server and asks for JSON constrained by a response schema.

mod config;
mod gemini;
mod llm;
mod llm_generator;
mod llm_translator;
mod traits;
mod types;

pub use config::{AiConfig, AiServices, LlmProvider};
pub use gemini::GeminiClient;
pub use llm::{
    extract_json_object, CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage,
    OllamaClient,
};
pub use llm_generator::{validate_draft, LlmRecipeGenerator, LlmRecipeGeneratorConfig};
pub use llm_translator::{LlmQueryTranslator, LlmQueryTranslatorConfig};
pub use traits::{AiError, QueryTranslator, RecipeGenerator};
pub use types::{RecipeDraft, StructuredQuery, Vocabulary};
