//! Authorization checks against the token of the current request.

use std::any::Any;
use std::sync::Arc;

use super::{
    decision::AccessDecisionManager, provider::AuthenticationProviderManager, token::Token,
    token_storage::TokenStorage,
};
use crate::error::{ServiceError, ServiceResult};

/// Answers "is the current token granted this attribute?".
///
/// Unauthenticated tokens (or every token, with `always_authenticate`) are
/// run through the authentication manager first and the result is stored
/// back, so the decision is made on a fresh token.
#[derive(Debug, Clone)]
pub struct AuthorizationChecker {
    decision_manager: Arc<AccessDecisionManager>,
    authentication_manager: Option<Arc<AuthenticationProviderManager>>,
    always_authenticate: bool,
    exception_on_no_token: bool,
}

impl AuthorizationChecker {
    #[must_use]
    pub fn new(
        decision_manager: Arc<AccessDecisionManager>,
        authentication_manager: Option<Arc<AuthenticationProviderManager>>,
        always_authenticate: bool,
        exception_on_no_token: bool,
    ) -> Self {
        Self {
            decision_manager,
            authentication_manager,
            always_authenticate,
            exception_on_no_token,
        }
    }

    #[must_use]
    pub const fn decision_manager(&self) -> &Arc<AccessDecisionManager> {
        &self.decision_manager
    }

    #[must_use]
    pub const fn authentication_manager(&self) -> Option<&Arc<AuthenticationProviderManager>> {
        self.authentication_manager.as_ref()
    }

    /// ## Summary
    /// Check `attribute` (optionally on `subject`) for the token in `storage`.
    ///
    /// ## Errors
    /// - `CredentialsNotFound` if the storage is empty and `exception_on_no_token` is set.
    /// - `InvalidConfiguration` if the token needs authenticating and no
    ///   authentication manager is configured.
    /// - Any error raised while re-authenticating the token.
    pub fn is_granted(
        &self,
        storage: &mut TokenStorage,
        attribute: &str,
        subject: Option<&dyn Any>,
    ) -> ServiceResult<bool> {
        let token = match storage.token() {
            Some(token) => self.authenticate_if_needed(storage, token)?,
            None if self.exception_on_no_token => {
                tracing::debug!(attribute, "No token available for authorization check");
                return Err(ServiceError::CredentialsNotFound);
            }
            None => Arc::new(Token::null()),
        };

        Ok(self.decision_manager.decide(&token, &[attribute], subject))
    }

    fn authenticate_if_needed(
        &self,
        storage: &mut TokenStorage,
        token: Arc<Token>,
    ) -> ServiceResult<Arc<Token>> {
        if token.is_authenticated() && !self.always_authenticate {
            return Ok(token);
        }

        let manager = self.authentication_manager.as_ref().ok_or_else(|| {
            ServiceError::InvalidConfiguration(
                "An authentication manager is required to authenticate the token.".to_string(),
            )
        })?;

        tracing::debug!(user = %token.user_identifier(), "Re-authenticating token before authorization");
        let token = Arc::new(manager.authenticate(&token)?);
        storage.set_token(Some(Arc::clone(&token)));
        Ok(token)
    }
}
