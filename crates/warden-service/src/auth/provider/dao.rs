use std::sync::Arc;

use warden_core::constants::NO_USERNAME;

use super::AuthenticationProvider;
use crate::{
    auth::{
        password::{needs_rehash, verify_password},
        token::{Token, TokenKind},
        user::{User, UserChecker, UserProvider},
    },
    error::{AuthResult, AuthenticationError},
};

/// Authenticates username/password tokens against a [`UserProvider`].
///
/// The flow is: load the user, run the pre-auth account checks, verify the
/// password, run the post-auth checks, and return a token carrying the user's
/// roles. With `hide_user_not_found` an unknown user and every credential
/// failure are reported as the same `BadCredentials` error. Account status
/// errors are never hidden.
pub struct DaoAuthenticationProvider {
    user_provider: Arc<dyn UserProvider>,
    user_checker: Arc<dyn UserChecker>,
    firewall: String,
    hide_user_not_found: bool,
}

impl DaoAuthenticationProvider {
    #[must_use]
    pub fn new(
        user_provider: Arc<dyn UserProvider>,
        user_checker: Arc<dyn UserChecker>,
        firewall: impl Into<String>,
        hide_user_not_found: bool,
    ) -> Self {
        Self {
            user_provider,
            user_checker,
            firewall: firewall.into(),
            hide_user_not_found,
        }
    }

    fn retrieve_user(&self, identifier: &str) -> AuthResult<User> {
        self.user_provider.load_user_by_identifier(identifier)
    }

    fn check_authentication(user: &User, token: &Token) -> AuthResult<()> {
        if let Some(token_user) = token.user() {
            if token_user.password() != user.password() {
                return Err(AuthenticationError::BadCredentials(
                    "The credentials were changed from another session.".to_string(),
                ));
            }
            return Ok(());
        }

        let presented = token.credentials().filter(|c| !c.is_empty()).ok_or_else(|| {
            AuthenticationError::BadCredentials("The presented password cannot be empty.".to_string())
        })?;
        let stored = user.password().ok_or_else(|| {
            AuthenticationError::BadCredentials("The user has no password.".to_string())
        })?;

        verify_password(presented, stored)?;
        if needs_rehash(stored) {
            tracing::info!(user = %user.identifier(), "Stored password hash uses outdated parameters");
        }
        Ok(())
    }

    fn hide(&self, err: AuthenticationError) -> AuthenticationError {
        match err {
            AuthenticationError::UserNotFound(_) | AuthenticationError::BadCredentials(_)
                if self.hide_user_not_found =>
            {
                tracing::debug!(error = %err, "Hiding authentication failure detail");
                AuthenticationError::BadCredentials("Bad credentials.".to_string())
            }
            other => other,
        }
    }
}

impl AuthenticationProvider for DaoAuthenticationProvider {
    fn supports(&self, token: &Token) -> bool {
        matches!(token.kind(), TokenKind::UsernamePassword { firewall } if *firewall == self.firewall)
    }

    #[tracing::instrument(skip(self, token), fields(user = %token.user_identifier()))]
    fn authenticate(&self, token: &Token) -> AuthResult<Token> {
        if !self.supports(token) {
            return Err(AuthenticationError::UnsupportedToken(
                "The token is not supported by this authentication provider.".to_string(),
            ));
        }

        let identifier = match token.user_identifier() {
            "" => NO_USERNAME,
            identifier => identifier,
        };

        let user = self.retrieve_user(identifier).map_err(|e| self.hide(e))?;

        self.user_checker.check_pre_auth(&user)?;
        Self::check_authentication(&user, token).map_err(|e| self.hide(e))?;
        self.user_checker.check_post_auth(&user)?;

        tracing::debug!(user = %user.identifier(), "Credentials verified");

        let roles = user.roles().to_vec();
        let credentials = token.credentials().unwrap_or_default().to_string();
        Ok(
            Token::username_password(user, credentials, self.firewall.as_str(), roles)
                .with_attributes(token.attributes().clone()),
        )
    }

    fn name(&self) -> &'static str {
        "dao"
    }
}
