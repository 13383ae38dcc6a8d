use std::sync::Arc;

use super::AuthenticationProvider;
use crate::{
    auth::token::Token,
    error::{AuthenticationError, ServiceError, ServiceResult},
};

/// Runs a token through an ordered list of providers.
///
/// Providers that do not support the token are skipped. The first provider to
/// return a token wins. Account status errors stop the chain; any other
/// failure is remembered and the next provider is tried.
pub struct AuthenticationProviderManager {
    providers: Vec<Arc<dyn AuthenticationProvider>>,
    erase_credentials: bool,
}

impl AuthenticationProviderManager {
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn AuthenticationProvider>>, erase_credentials: bool) -> Self {
        Self {
            providers,
            erase_credentials,
        }
    }

    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// ## Summary
    /// Authenticate `token` with the first provider that accepts it.
    ///
    /// ## Errors
    /// - `InvalidConfiguration` if no provider is registered.
    /// - The account status error of the provider that raised it.
    /// - Otherwise the last provider error, or `ProviderNotFound` if no
    ///   provider supports this kind of token.
    #[tracing::instrument(skip_all, fields(kind = %token.kind(), user = %token.user_identifier()))]
    pub fn authenticate(&self, token: &Token) -> ServiceResult<Token> {
        if self.providers.is_empty() {
            return Err(ServiceError::InvalidConfiguration(
                "You must at least add one authentication provider.".to_string(),
            ));
        }

        let mut last_error: Option<AuthenticationError> = None;

        for provider in &self.providers {
            if !provider.supports(token) {
                continue;
            }

            match provider.authenticate(token) {
                Ok(mut authenticated) => {
                    if self.erase_credentials {
                        authenticated.erase_credentials();
                    }
                    tracing::debug!(provider = provider.name(), "Authentication succeeded");
                    return Ok(authenticated);
                }
                Err(err) if err.is_account_status() => {
                    tracing::info!(provider = provider.name(), error = %err, "Account status check failed");
                    return Err(err.into());
                }
                Err(err) => {
                    tracing::debug!(provider = provider.name(), error = %err, "Provider rejected token");
                    last_error = Some(err);
                }
            }
        }

        let err = last_error
            .unwrap_or_else(|| AuthenticationError::ProviderNotFound(token.kind().to_string()));
        tracing::info!(error = %err, "Authentication failed");
        Err(err.into())
    }
}

impl std::fmt::Debug for AuthenticationProviderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationProviderManager")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("erase_credentials", &self.erase_credentials)
            .finish()
    }
}
