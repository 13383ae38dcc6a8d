//! Wiring of the security services from [`SecurityConfig`].
//!
//! A [`SecurityContext`] is built once at startup and holds the shared,
//! immutable pieces. Each request gets its own [`Security`] facade from
//! [`SecurityContext::security`].

use std::sync::Arc;

use warden_service::auth::{
    AccessDecisionManager, AnonymousAuthenticationProvider, AuthenticatedVoter,
    AuthenticationProvider, AuthenticationProviderManager, AuthorizationChecker,
    DaoAuthenticationProvider, DefaultUserChecker, InMemoryUserProvider,
    PreAuthenticatedAuthenticationProvider, RememberMeAuthenticationProvider, RoleHierarchy,
    RoleHierarchyVoter, Security, Token, TokenStorage, User, UserChecker, UserProvider, Voter,
};

use crate::{config::SecurityConfig, error::AppResult};

/// Shared security services built from configuration.
#[derive(Debug, Clone)]
pub struct SecurityContext {
    firewall: String,
    anonymous_secret: String,
    always_authenticate: bool,
    role_hierarchy: Arc<RoleHierarchy>,
    user_provider: Arc<InMemoryUserProvider>,
    decision_manager: Arc<AccessDecisionManager>,
    authentication_manager: Arc<AuthenticationProviderManager>,
}

impl SecurityContext {
    /// ## Summary
    /// Build the role hierarchy, users, voters, providers and managers.
    ///
    /// ## Errors
    /// Returns an error if the decision strategy is unsupported or two users
    /// share an identifier.
    #[tracing::instrument(skip_all, fields(firewall = %config.firewall))]
    pub fn from_config(config: &SecurityConfig) -> AppResult<Self> {
        let role_hierarchy = Arc::new(RoleHierarchy::new(
            config
                .role_hierarchy
                .iter()
                .map(|(role, implied)| (role.as_str(), implied.iter().map(String::as_str))),
        ));

        let user_provider = Arc::new(InMemoryUserProvider::with_users(
            config.users.iter().map(|(identifier, user)| {
                User::new(
                    identifier.as_str(),
                    Some(user.password.clone()),
                    user.roles.iter().map(String::as_str),
                )
                .with_enabled(user.enabled)
                .with_locked(user.locked)
            }),
        )?);

        let voters: Vec<Arc<dyn Voter>> = vec![
            Arc::new(RoleHierarchyVoter::new(Arc::clone(&role_hierarchy))),
            Arc::new(AuthenticatedVoter::new()),
        ];
        let decision_manager = Arc::new(AccessDecisionManager::from_config(
            voters,
            &config.access_decision_manager,
        )?);

        let user_checker: Arc<dyn UserChecker> = Arc::new(DefaultUserChecker);
        let users: Arc<dyn UserProvider> = user_provider.clone();
        let providers: Vec<Arc<dyn AuthenticationProvider>> = vec![
            Arc::new(DaoAuthenticationProvider::new(
                Arc::clone(&users),
                Arc::clone(&user_checker),
                config.firewall.as_str(),
                config.hide_user_not_found,
            )),
            Arc::new(RememberMeAuthenticationProvider::new(
                Arc::clone(&user_checker),
                config.anonymous_secret.as_str(),
                config.firewall.as_str(),
            )),
            Arc::new(PreAuthenticatedAuthenticationProvider::new(
                users,
                user_checker,
                config.firewall.as_str(),
            )),
            Arc::new(AnonymousAuthenticationProvider::new(config.anonymous_secret.as_str())),
        ];
        let authentication_manager = Arc::new(AuthenticationProviderManager::new(
            providers,
            config.erase_credentials,
        ));

        tracing::info!(
            user_count = user_provider.len(),
            strategy = %decision_manager.strategy(),
            "Security context ready"
        );

        Ok(Self {
            firewall: config.firewall.clone(),
            anonymous_secret: config.anonymous_secret.clone(),
            always_authenticate: config.always_authenticate_before_granting,
            role_hierarchy,
            user_provider,
            decision_manager,
            authentication_manager,
        })
    }

    /// A fresh facade with empty token storage, for one request.
    #[must_use]
    pub fn security(&self) -> Security {
        Security::new(TokenStorage::new(), self.authorization_checker())
    }

    #[must_use]
    pub fn authorization_checker(&self) -> AuthorizationChecker {
        AuthorizationChecker::new(
            Arc::clone(&self.decision_manager),
            Some(Arc::clone(&self.authentication_manager)),
            self.always_authenticate,
            false,
        )
    }

    /// An unauthenticated username/password token for this firewall.
    #[must_use]
    pub fn credentials_token(&self, identifier: &str, password: &str) -> Token {
        Token::username_password(identifier, password, self.firewall.as_str(), std::iter::empty::<&str>())
    }

    /// An anonymous token carrying the configured secret.
    #[must_use]
    pub fn anonymous_token(&self) -> Token {
        Token::anonymous(self.anonymous_secret.as_str(), std::iter::empty::<&str>())
    }

    /// A remember-me token for `user`, signed with the configured secret.
    #[must_use]
    pub fn remember_me_token(&self, user: User) -> Token {
        Token::remember_me(user, self.firewall.as_str(), self.anonymous_secret.as_str())
    }

    #[must_use]
    pub const fn role_hierarchy(&self) -> &Arc<RoleHierarchy> {
        &self.role_hierarchy
    }

    #[must_use]
    pub const fn user_provider(&self) -> &Arc<InMemoryUserProvider> {
        &self.user_provider
    }

    #[must_use]
    pub const fn decision_manager(&self) -> &Arc<AccessDecisionManager> {
        &self.decision_manager
    }

    #[must_use]
    pub const fn authentication_manager(&self) -> &Arc<AuthenticationProviderManager> {
        &self.authentication_manager
    }
}
