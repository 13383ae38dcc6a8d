use thiserror::Error;

/// Why an account may not authenticate, regardless of the credentials presented.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountStatusError {
    #[error("Account is locked: {0}")]
    Locked(String),

    #[error("Account is disabled: {0}")]
    Disabled(String),

    #[error("Account has expired: {0}")]
    Expired(String),

    #[error("Credentials have expired: {0}")]
    CredentialsExpired(String),
}

/// Authentication failures raised by providers and the provider manager.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// Terminal state of the account; no other provider is consulted.
    #[error(transparent)]
    AccountStatus(#[from] AccountStatusError),

    #[error("Bad credentials: {0}")]
    BadCredentials(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Token not supported: {0}")]
    UnsupportedToken(String),

    /// No configured provider accepts this kind of token.
    #[error("No authentication provider found for token of kind \"{0}\"")]
    ProviderNotFound(String),
}

impl AuthenticationError {
    /// Returns `true` for errors that must stop the provider chain.
    #[must_use]
    pub const fn is_account_status(&self) -> bool {
        matches!(self, Self::AccountStatus(_))
    }
}

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error(transparent)]
    CoreError(#[from] warden_core::error::CoreError),

    #[error("No token found in token storage")]
    CredentialsNotFound,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

pub type AuthResult<T> = std::result::Result<T, AuthenticationError>;
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
