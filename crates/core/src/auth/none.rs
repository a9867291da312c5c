use async_trait::async_trait;

use super::{AuthError, AuthRequest, Authenticator, Identity};

/// Open mode: every request, with or without credentials, is anonymous.
///
/// Selected with `method = "none"`; never a fallback.
#[derive(Debug, Default)]
pub struct NoneAuthenticator;

impl NoneAuthenticator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Authenticator for NoneAuthenticator {
    async fn authenticate(&self, _request: &AuthRequest) -> Result<Identity, AuthError> {
        Ok(Identity::anonymous())
    }

    fn method_name(&self) -> &'static str {
        "none"
    }
}
