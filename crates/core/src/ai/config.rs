//! AI provider configuration and service construction.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::gemini::GeminiClient;
use super::llm::{LlmClient, LlmError, OllamaClient};
use super::llm_generator::{LlmRecipeGenerator, LlmRecipeGeneratorConfig};
use super::llm_translator::{LlmQueryTranslator, LlmQueryTranslatorConfig};
use super::traits::{QueryTranslator, RecipeGenerator};

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    /// Google Gemini API.
    Gemini,
    /// Local Ollama instance.
    Ollama,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini",
            LlmProvider::Ollama => "ollama",
        }
    }
}

/// LLM client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub provider: LlmProvider,
    /// Model name/identifier.
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API base URL (for proxies or self-hosted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum tokens for completions.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: f32,
}

fn default_timeout() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    1024
}

/// The AI components the server exposes.
#[derive(Clone)]
pub struct AiServices {
    pub translator: Arc<dyn QueryTranslator>,
    pub generator: Arc<dyn RecipeGenerator>,
}

impl AiServices {
    pub fn new(translator: Arc<dyn QueryTranslator>, generator: Arc<dyn RecipeGenerator>) -> Self {
        Self {
            translator,
            generator,
        }
    }

    /// Build the translator and generator for the configured provider.
    pub fn from_config(config: &AiConfig) -> Result<Self, LlmError> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let services = match config.provider {
            LlmProvider::Gemini => {
                let api_key = config
                    .api_key
                    .as_deref()
                    .filter(|k| !k.is_empty())
                    .ok_or(LlmError::NotConfigured)?;
                let mut client =
                    GeminiClient::new(api_key, config.model.clone()).with_timeout(timeout);
                if let Some(ref api_base) = config.api_base {
                    client = client.with_api_base(api_base.clone());
                }
                Self::with_client(Arc::new(client), config)
            }
            LlmProvider::Ollama => {
                let mut client = OllamaClient::new(config.model.clone()).with_timeout(timeout);
                if let Some(ref api_base) = config.api_base {
                    client = client.with_api_base(api_base.clone());
                }
                Self::with_client(Arc::new(client), config)
            }
        };

        info!(
            provider = config.provider.as_str(),
            model = %config.model,
            "AI integration enabled"
        );
        Ok(services)
    }

    fn with_client<C: LlmClient + 'static>(client: Arc<C>, config: &AiConfig) -> Self {
        let translator = LlmQueryTranslator::with_config(
            Arc::clone(&client),
            LlmQueryTranslatorConfig {
                max_tokens: config.max_tokens,
                temperature: config.temperature,
            },
        );
        let generator = LlmRecipeGenerator::with_config(
            client,
            LlmRecipeGeneratorConfig {
                max_tokens: config.max_tokens.max(2048),
                temperature: config.temperature,
            },
        );
        Self::new(Arc::new(translator), Arc::new(generator))
    }
}
