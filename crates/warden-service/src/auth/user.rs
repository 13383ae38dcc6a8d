//! User accounts, user providers and account status checks.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::{AccountStatusError, AuthResult, AuthenticationError, ServiceError, ServiceResult};

/// A user account as loaded by a [`UserProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    identifier: String,
    password: Option<String>,
    roles: Vec<String>,
    enabled: bool,
    locked: bool,
    account_expires_at: Option<DateTime<Utc>>,
    credentials_expire_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create an enabled, unlocked, non-expiring account.
    ///
    /// `password` is the stored Argon2 hash, not the plain-text password.
    #[must_use]
    pub fn new<R: Into<String>>(
        identifier: impl Into<String>,
        password: Option<String>,
        roles: impl IntoIterator<Item = R>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            password,
            roles: roles.into_iter().map(Into::into).collect(),
            enabled: true,
            locked: false,
            account_expires_at: None,
            credentials_expire_at: None,
        }
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    #[must_use]
    pub fn with_account_expires_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.account_expires_at = at;
        self
    }

    #[must_use]
    pub fn with_credentials_expire_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.credentials_expire_at = at;
        self
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn is_account_expired(&self, now: DateTime<Utc>) -> bool {
        self.account_expires_at.is_some_and(|at| at <= now)
    }

    #[must_use]
    pub fn is_credentials_expired(&self, now: DateTime<Utc>) -> bool {
        self.credentials_expire_at.is_some_and(|at| at <= now)
    }
}

/// Loads users by identifier.
pub trait UserProvider: Send + Sync {
    /// ## Errors
    /// Returns `UserNotFound` if no user has this identifier.
    fn load_user_by_identifier(&self, identifier: &str) -> AuthResult<User>;
}

/// A user provider backed by a map. Identifiers are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserProvider {
    users: HashMap<String, User>,
}

impl InMemoryUserProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Create a provider holding the given users.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if two users share an identifier.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> ServiceResult<Self> {
        let mut provider = Self::new();
        for user in users {
            provider.create_user(user)?;
        }
        Ok(provider)
    }

    /// ## Summary
    /// Add a user to the provider.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if a user with the same identifier exists.
    pub fn create_user(&mut self, user: User) -> ServiceResult<()> {
        let key = user.identifier().to_lowercase();
        if self.users.contains_key(&key) {
            return Err(ServiceError::InvalidConfiguration(format!(
                "Cannot add another user with the same identifier \"{}\"",
                user.identifier()
            )));
        }
        self.users.insert(key, user);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserProvider for InMemoryUserProvider {
    fn load_user_by_identifier(&self, identifier: &str) -> AuthResult<User> {
        self.users
            .get(&identifier.to_lowercase())
            .cloned()
            .ok_or_else(|| AuthenticationError::UserNotFound(identifier.to_string()))
    }
}

/// Account status checks run around credential verification.
pub trait UserChecker: Send + Sync {
    /// Checks that must pass before credentials are even looked at.
    ///
    /// ## Errors
    /// Returns an account status error if the account may not log in.
    fn check_pre_auth(&self, user: &User) -> AuthResult<()>;

    /// Checks that run once credentials have been verified.
    ///
    /// ## Errors
    /// Returns an account status error if the account may not log in.
    fn check_post_auth(&self, user: &User) -> AuthResult<()>;
}

/// Checks the lock, enabled and expiry flags of a [`User`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUserChecker;

impl UserChecker for DefaultUserChecker {
    fn check_pre_auth(&self, user: &User) -> AuthResult<()> {
        let identifier = user.identifier().to_string();
        if user.is_locked() {
            tracing::debug!(user = %identifier, "Account is locked");
            return Err(AccountStatusError::Locked(identifier).into());
        }
        if !user.is_enabled() {
            tracing::debug!(user = %identifier, "Account is disabled");
            return Err(AccountStatusError::Disabled(identifier).into());
        }
        if user.is_account_expired(Utc::now()) {
            tracing::debug!(user = %identifier, "Account has expired");
            return Err(AccountStatusError::Expired(identifier).into());
        }
        Ok(())
    }

    fn check_post_auth(&self, user: &User) -> AuthResult<()> {
        if user.is_credentials_expired(Utc::now()) {
            tracing::debug!(user = %user.identifier(), "Credentials have expired");
            return Err(AccountStatusError::CredentialsExpired(user.identifier().to_string()).into());
        }
        Ok(())
    }
}
