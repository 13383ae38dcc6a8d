//! Convenience facade over token storage and the authorization checker.

use std::any::Any;
use std::sync::Arc;

use super::{checker::AuthorizationChecker, token::Token, token_storage::TokenStorage, user::User};
use crate::error::{ServiceError, ServiceResult};

/// Per-request entry point: who is logged in, and may they do this?
#[derive(Debug)]
pub struct Security {
    storage: TokenStorage,
    checker: AuthorizationChecker,
}

impl Security {
    #[must_use]
    pub const fn new(storage: TokenStorage, checker: AuthorizationChecker) -> Self {
        Self { storage, checker }
    }

    /// The token of the current request, if any.
    pub fn token(&mut self) -> Option<Arc<Token>> {
        self.storage.token()
    }

    /// The logged in user, if the token carries one.
    pub fn user(&mut self) -> Option<User> {
        self.storage.token().and_then(|token| token.user().cloned())
    }

    /// ## Errors
    /// See [`AuthorizationChecker::is_granted`].
    pub fn is_granted(&mut self, attribute: &str, subject: Option<&dyn Any>) -> ServiceResult<bool> {
        self.checker.is_granted(&mut self.storage, attribute, subject)
    }

    /// ## Summary
    /// Like [`Self::is_granted`], but a denial is an error.
    ///
    /// ## Errors
    /// Returns `AccessDenied` when the attribute is not granted, or any
    /// error from the authorization check itself.
    pub fn deny_access_unless_granted(
        &mut self,
        attribute: &str,
        subject: Option<&dyn Any>,
    ) -> ServiceResult<()> {
        if self.is_granted(attribute, subject)? {
            return Ok(());
        }
        tracing::info!(attribute, "Access denied");
        Err(ServiceError::AccessDenied(format!(
            "Access Denied: \"{attribute}\" is not granted."
        )))
    }

    /// ## Summary
    /// Authenticate `token` and make the result the current token.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if no authentication manager is
    /// configured, or the authentication failure. The stored token is left
    /// untouched on failure.
    pub fn login(&mut self, token: &Token) -> ServiceResult<Arc<Token>> {
        let manager = self.checker.authentication_manager().ok_or_else(|| {
            ServiceError::InvalidConfiguration(
                "An authentication manager is required to log in.".to_string(),
            )
        })?;

        let authenticated = Arc::new(manager.authenticate(token)?);
        tracing::info!(user = %authenticated.user_identifier(), "User logged in");
        self.storage.set_token(Some(Arc::clone(&authenticated)));
        Ok(authenticated)
    }

    /// Forget the current token and any pending initializer.
    pub fn logout(&mut self) {
        if let Some(token) = self.storage.token() {
            tracing::info!(user = %token.user_identifier(), "User logged out");
        }
        self.storage.reset();
    }

    /// Direct access to the underlying storage, e.g. to register an initializer.
    pub const fn storage_mut(&mut self) -> &mut TokenStorage {
        &mut self.storage
    }
}
