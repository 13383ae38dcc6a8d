/// Prefix that marks an attribute as a role check for the role voters.
pub const ROLE_PREFIX: &str = "ROLE_";

const IS_AUTHENTICATED_PREFIX: &str = "IS_AUTHENTICATED_";

/// Granted to fully authenticated tokens (not anonymous, not remember-me).
pub const IS_AUTHENTICATED_FULLY: &str = const_str::concat!(IS_AUTHENTICATED_PREFIX, "FULLY");
/// Granted to remember-me and fully authenticated tokens.
pub const IS_AUTHENTICATED_REMEMBERED: &str =
    const_str::concat!(IS_AUTHENTICATED_PREFIX, "REMEMBERED");
/// Granted to anonymous, remember-me and fully authenticated tokens.
pub const IS_AUTHENTICATED_ANONYMOUSLY: &str =
    const_str::concat!(IS_AUTHENTICATED_PREFIX, "ANONYMOUSLY");

/// Granted to everyone, including requests without any real token.
pub const PUBLIC_ACCESS: &str = "PUBLIC_ACCESS";
/// Granted only to anonymous tokens.
pub const IS_ANONYMOUS: &str = "IS_ANONYMOUS";
/// Granted only to remember-me tokens.
pub const IS_REMEMBERED: &str = "IS_REMEMBERED";

/// Identifier used when a username/password token carries an empty username.
pub const NO_USERNAME: &str = "NONE_PROVIDED";

/// Principal name given to anonymous tokens.
pub const ANONYMOUS_PRINCIPAL: &str = "anon.";

/// Default firewall name used when none is configured.
pub const DEFAULT_FIREWALL: &str = "main";
