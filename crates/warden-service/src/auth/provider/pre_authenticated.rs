use std::sync::Arc;

use super::AuthenticationProvider;
use crate::{
    auth::{
        token::{Token, TokenKind},
        user::{UserChecker, UserProvider},
    },
    error::{AuthResult, AuthenticationError},
};

/// Trusts principals vouched for upstream (client certificates, proxy
/// headers) and only loads the matching user and its roles.
///
/// No password is verified, so only the post-auth checks run.
pub struct PreAuthenticatedAuthenticationProvider {
    user_provider: Arc<dyn UserProvider>,
    user_checker: Arc<dyn UserChecker>,
    firewall: String,
}

impl PreAuthenticatedAuthenticationProvider {
    #[must_use]
    pub fn new(
        user_provider: Arc<dyn UserProvider>,
        user_checker: Arc<dyn UserChecker>,
        firewall: impl Into<String>,
    ) -> Self {
        Self {
            user_provider,
            user_checker,
            firewall: firewall.into(),
        }
    }
}

impl AuthenticationProvider for PreAuthenticatedAuthenticationProvider {
    fn supports(&self, token: &Token) -> bool {
        matches!(token.kind(), TokenKind::PreAuthenticated { firewall } if *firewall == self.firewall)
    }

    #[tracing::instrument(skip(self, token), fields(user = %token.user_identifier()))]
    fn authenticate(&self, token: &Token) -> AuthResult<Token> {
        if !self.supports(token) {
            return Err(AuthenticationError::UnsupportedToken(token.kind().to_string()));
        }

        let identifier = token.user_identifier();
        if identifier.is_empty() {
            return Err(AuthenticationError::BadCredentials(
                "No pre-authenticated principal found in request.".to_string(),
            ));
        }

        let user = self.user_provider.load_user_by_identifier(identifier)?;
        self.user_checker.check_post_auth(&user)?;

        let roles = user.roles().to_vec();
        Ok(Token::pre_authenticated(
            user,
            token.credentials().map(str::to_string),
            self.firewall.as_str(),
            roles,
        )
        .with_attributes(token.attributes().clone()))
    }

    fn name(&self) -> &'static str {
        "pre_authenticated"
    }
}
