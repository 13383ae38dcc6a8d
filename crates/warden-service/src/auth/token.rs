//! Authentication tokens.
//!
//! A [`Token`] is the result (or the request) of an authentication: who the
//! principal is, which roles it holds, and whether it has been authenticated.
//! The kind of authentication is carried by [`TokenKind`], which providers use
//! to decide whether they support a token and voters use as a trust level.

use std::collections::BTreeMap;

use warden_core::{Role, constants::ANONYMOUS_PRINCIPAL};

use crate::error::{ServiceError, ServiceResult};

use super::user::User;

/// How a token was (or is to be) authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier and password presented to a firewall.
    UsernamePassword { firewall: String },
    /// Principal vouched for by an upstream system (TLS client cert, proxy header).
    PreAuthenticated { firewall: String },
    /// Restored from a remember-me cookie.
    RememberMe { firewall: String, secret: String },
    /// Anonymous visitor.
    Anonymous { secret: String },
    /// Placeholder used when no token is stored.
    Null,
}

impl TokenKind {
    /// Short name used in logs and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UsernamePassword { .. } => "username_password",
            Self::PreAuthenticated { .. } => "pre_authenticated",
            Self::RememberMe { .. } => "remember_me",
            Self::Anonymous { .. } => "anonymous",
            Self::Null => "null",
        }
    }

    /// The firewall the token belongs to, for kinds bound to one.
    #[must_use]
    pub fn firewall(&self) -> Option<&str> {
        match self {
            Self::UsernamePassword { firewall }
            | Self::PreAuthenticated { firewall }
            | Self::RememberMe { firewall, .. } => Some(firewall),
            Self::Anonymous { .. } | Self::Null => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The principal behind a token: a loaded user, or just an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    User(User),
    Identifier(String),
}

impl Principal {
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::User(user) => user.identifier(),
            Self::Identifier(identifier) => identifier,
        }
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::User(user) => Some(user),
            Self::Identifier(_) => None,
        }
    }
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl From<&str> for Principal {
    fn from(identifier: &str) -> Self {
        Self::Identifier(identifier.to_string())
    }
}

impl From<String> for Principal {
    fn from(identifier: String) -> Self {
        Self::Identifier(identifier)
    }
}

/// An authentication token.
#[derive(Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    principal: Principal,
    credentials: Option<String>,
    roles: Vec<String>,
    authenticated: bool,
    attributes: BTreeMap<String, serde_json::Value>,
}

impl Token {
    fn build<R: Into<String>>(
        kind: TokenKind,
        principal: Principal,
        credentials: Option<String>,
        roles: impl IntoIterator<Item = R>,
    ) -> Self {
        Self {
            kind,
            principal,
            credentials,
            roles: roles.into_iter().map(Into::into).collect(),
            authenticated: false,
            attributes: BTreeMap::new(),
        }
    }

    /// A username/password token. It counts as authenticated only when it is
    /// created with at least one role, which is what providers do on success.
    #[must_use]
    pub fn username_password<R: Into<String>>(
        principal: impl Into<Principal>,
        credentials: impl Into<String>,
        firewall: impl Into<String>,
        roles: impl IntoIterator<Item = R>,
    ) -> Self {
        let mut token = Self::build(
            TokenKind::UsernamePassword {
                firewall: firewall.into(),
            },
            principal.into(),
            Some(credentials.into()),
            roles,
        );
        token.authenticated = !token.roles.is_empty();
        token
    }

    /// A pre-authenticated token; authenticated when created with roles.
    #[must_use]
    pub fn pre_authenticated<R: Into<String>>(
        principal: impl Into<Principal>,
        credentials: Option<String>,
        firewall: impl Into<String>,
        roles: impl IntoIterator<Item = R>,
    ) -> Self {
        let mut token = Self::build(
            TokenKind::PreAuthenticated {
                firewall: firewall.into(),
            },
            principal.into(),
            credentials,
            roles,
        );
        token.authenticated = !token.roles.is_empty();
        token
    }

    /// A remember-me token for `user`, carrying the user's roles.
    #[must_use]
    pub fn remember_me(user: User, firewall: impl Into<String>, secret: impl Into<String>) -> Self {
        let roles = user.roles().to_vec();
        let mut token = Self::build(
            TokenKind::RememberMe {
                firewall: firewall.into(),
                secret: secret.into(),
            },
            Principal::User(user),
            None,
            roles,
        );
        token.authenticated = true;
        token
    }

    /// An anonymous token. `secret` must match the anonymous provider's secret.
    #[must_use]
    pub fn anonymous<R: Into<String>>(
        secret: impl Into<String>,
        roles: impl IntoIterator<Item = R>,
    ) -> Self {
        let mut token = Self::build(
            TokenKind::Anonymous {
                secret: secret.into(),
            },
            Principal::from(ANONYMOUS_PRINCIPAL),
            None,
            roles,
        );
        token.authenticated = true;
        token
    }

    /// A token standing in for "nobody": no principal, no roles, not authenticated.
    #[must_use]
    pub fn null() -> Self {
        Self::build(
            TokenKind::Null,
            Principal::Identifier(String::new()),
            None,
            std::iter::empty::<String>(),
        )
    }

    #[must_use]
    pub const fn kind(&self) -> &TokenKind {
        &self.kind
    }

    #[must_use]
    pub const fn principal(&self) -> &Principal {
        &self.principal
    }

    /// The loaded user, if the principal is one.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.principal.user()
    }

    #[must_use]
    pub fn user_identifier(&self) -> &str {
        self.principal.identifier()
    }

    #[must_use]
    pub fn credentials(&self) -> Option<&str> {
        self.credentials.as_deref()
    }

    #[must_use]
    pub fn role_names(&self) -> &[String] {
        &self.roles
    }

    #[must_use]
    pub fn roles(&self) -> Vec<Role> {
        self.roles.iter().map(|role| Role::new(role.as_str())).collect()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// ## Summary
    /// Mark the token as (un)authenticated.
    ///
    /// ## Errors
    /// Username/password and pre-authenticated tokens can only become
    /// authenticated by being rebuilt with roles; flipping them to `true`
    /// returns `InvariantViolation`.
    pub fn set_authenticated(&mut self, authenticated: bool) -> ServiceResult<()> {
        if authenticated
            && matches!(
                self.kind,
                TokenKind::UsernamePassword { .. } | TokenKind::PreAuthenticated { .. }
            )
        {
            return Err(ServiceError::InvariantViolation(
                "Cannot set this token to trusted after instantiation",
            ));
        }
        self.authenticated = authenticated;
        Ok(())
    }

    /// Drop the plain-text credentials.
    pub fn erase_credentials(&mut self) {
        self.credentials = None;
    }

    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.attributes.insert(name.into(), value);
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: BTreeMap<String, serde_json::Value>) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self.kind, TokenKind::Anonymous { .. })
    }

    #[must_use]
    pub const fn is_remember_me(&self) -> bool {
        matches!(self.kind, TokenKind::RememberMe { .. })
    }

    /// Authenticated through credentials or an upstream system, as opposed to
    /// anonymously or from a remember-me cookie.
    #[must_use]
    pub const fn is_fully_authenticated(&self) -> bool {
        self.authenticated
            && matches!(
                self.kind,
                TokenKind::UsernamePassword { .. } | TokenKind::PreAuthenticated { .. }
            )
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind.name())
            .field("user", &self.user_identifier())
            .field("authenticated", &self.authenticated)
            .field("roles", &self.roles)
            .field("credentials", &self.credentials.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}
