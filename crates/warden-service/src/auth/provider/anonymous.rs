use super::{AuthenticationProvider, secret_matches};
use crate::{
    auth::token::{Token, TokenKind},
    error::{AuthResult, AuthenticationError},
};

/// Accepts anonymous tokens minted with the configured secret.
#[derive(Debug, Clone)]
pub struct AnonymousAuthenticationProvider {
    secret: String,
}

impl AnonymousAuthenticationProvider {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl AuthenticationProvider for AnonymousAuthenticationProvider {
    fn supports(&self, token: &Token) -> bool {
        token.is_anonymous()
    }

    fn authenticate(&self, token: &Token) -> AuthResult<Token> {
        let TokenKind::Anonymous { secret } = token.kind() else {
            return Err(AuthenticationError::UnsupportedToken(token.kind().to_string()));
        };

        if !secret_matches(&self.secret, secret) {
            tracing::debug!("Anonymous token secret mismatch");
            return Err(AuthenticationError::BadCredentials(
                "The Token does not contain the expected key.".to_string(),
            ));
        }

        Ok(token.clone())
    }

    fn name(&self) -> &'static str {
        "anonymous"
    }
}
