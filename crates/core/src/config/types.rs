use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::ai::AiConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// AI-assisted search and recipe generation (disabled when absent)
    #[serde(default)]
    pub ai: Option<AiConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3000
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    /// HMAC secret used to sign and verify access tokens.
    #[serde(default)]
    pub token_secret: Option<String>,
    /// Access token lifetime in seconds (default: 1 hour)
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    /// bcrypt cost factor for stored passwords
    #[serde(default = "default_password_cost")]
    pub password_cost: u32,
}

fn default_token_ttl() -> u64 {
    3600
}

fn default_password_cost() -> u32 {
    12
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    None,
    Jwt,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    /// Insert the default cuisines and tags at startup
    #[serde(default = "default_seed")]
    pub seed_reference_data: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            seed_reference_data: default_seed(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("recipebook.db")
}

fn default_seed() -> bool {
    true
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<SanitizedAiConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub method: String,
    pub token_secret_configured: bool,
    pub token_ttl_secs: u64,
}

/// Sanitized AI config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAiConfig {
    pub provider: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                method: match config.auth.method {
                    AuthMethod::None => "none".to_string(),
                    AuthMethod::Jwt => "jwt".to_string(),
                },
                token_secret_configured: config
                    .auth
                    .token_secret
                    .as_ref()
                    .is_some_and(|s| !s.is_empty()),
                token_ttl_secs: config.auth.token_ttl_secs,
            },
            server: config.server.clone(),
            database: config.database.clone(),
            ai: config.ai.as_ref().map(|ai| SanitizedAiConfig {
                provider: ai.provider.as_str().to_string(),
                model: ai.model.clone(),
                api_base: ai.api_base.clone(),
                api_key_configured: ai.api_key.as_ref().is_some_and(|k| !k.is_empty()),
                timeout_secs: ai.timeout_secs,
            }),
        }
    }
}
