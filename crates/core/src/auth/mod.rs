mod jwt;
mod none;
mod password;
mod traits;
mod types;

pub use jwt::*;
pub use none::*;
pub use password::*;
pub use traits::*;
pub use types::*;

use std::sync::Arc;

use crate::config::AuthConfig;

/// Token issuing service for the configured secret, if one is set.
pub fn create_token_service(config: &AuthConfig) -> Option<Arc<TokenService>> {
    config
        .token_secret
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|secret| Arc::new(TokenService::new(secret, config.token_ttl_secs)))
}

/// Factory function to create authenticator from config
pub fn create_authenticator(
    config: &AuthConfig,
    tokens: Option<Arc<TokenService>>,
) -> Result<Box<dyn Authenticator>, AuthError> {
    use crate::config::AuthMethod;

    match config.method {
        AuthMethod::None => Ok(Box::new(NoneAuthenticator::new())),
        AuthMethod::Jwt => {
            let tokens = tokens.ok_or_else(|| {
                AuthError::ConfigurationError(
                    "token_secret must be set when using Jwt auth method".to_string(),
                )
            })?;
            Ok(Box::new(JwtAuthenticator::new(tokens)))
        }
    }
}
