use std::sync::Arc;

use super::{AuthenticationProvider, secret_matches};
use crate::{
    auth::{
        token::{Token, TokenKind},
        user::UserChecker,
    },
    error::{AuthResult, AuthenticationError},
};

/// Accepts remember-me tokens issued for its firewall with its secret.
///
/// The user inside the token is re-checked before it is trusted, so a user
/// locked since the cookie was issued is refused.
pub struct RememberMeAuthenticationProvider {
    user_checker: Arc<dyn UserChecker>,
    secret: String,
    firewall: String,
}

impl RememberMeAuthenticationProvider {
    #[must_use]
    pub fn new(
        user_checker: Arc<dyn UserChecker>,
        secret: impl Into<String>,
        firewall: impl Into<String>,
    ) -> Self {
        Self {
            user_checker,
            secret: secret.into(),
            firewall: firewall.into(),
        }
    }
}

impl AuthenticationProvider for RememberMeAuthenticationProvider {
    fn supports(&self, token: &Token) -> bool {
        matches!(token.kind(), TokenKind::RememberMe { firewall, .. } if *firewall == self.firewall)
    }

    #[tracing::instrument(skip(self, token), fields(user = %token.user_identifier()))]
    fn authenticate(&self, token: &Token) -> AuthResult<Token> {
        if !self.supports(token) {
            return Err(AuthenticationError::UnsupportedToken(token.kind().to_string()));
        }
        let TokenKind::RememberMe { secret, .. } = token.kind() else {
            return Err(AuthenticationError::UnsupportedToken(token.kind().to_string()));
        };

        if !secret_matches(&self.secret, secret) {
            return Err(AuthenticationError::BadCredentials(
                "The presented secret does not match.".to_string(),
            ));
        }

        let user = token
            .user()
            .ok_or_else(|| AuthenticationError::UserNotFound(token.user_identifier().to_string()))?;
        self.user_checker.check_pre_auth(user)?;

        Ok(
            Token::remember_me(user.clone(), self.firewall.as_str(), self.secret.as_str())
                .with_attributes(token.attributes().clone()),
        )
    }

    fn name(&self) -> &'static str {
        "remember_me"
    }
}
