use super::{
    types::{AuthMethod, Config},
    ConfigError,
};
use crate::ai::LlmProvider;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - JWT auth has a non-empty token secret
/// - Password cost is within bcrypt's accepted range
/// - AI section has a model, and an API key for hosted providers
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.auth.method == AuthMethod::Jwt
        && config.auth.token_secret.as_deref().unwrap_or("").is_empty()
    {
        return Err(ConfigError::ValidationError(
            "auth.token_secret must be set when using jwt auth".to_string(),
        ));
    }

    if !(4..=31).contains(&config.auth.password_cost) {
        return Err(ConfigError::ValidationError(format!(
            "auth.password_cost must be between 4 and 31, got {}",
            config.auth.password_cost
        )));
    }

    if let Some(ai) = &config.ai {
        if ai.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "ai.model cannot be empty".to_string(),
            ));
        }
        if ai.provider == LlmProvider::Gemini && ai.api_key.as_deref().unwrap_or("").is_empty() {
            return Err(ConfigError::ValidationError(
                "ai.api_key is required for the gemini provider".to_string(),
            ));
        }
    }

    Ok(())
}
