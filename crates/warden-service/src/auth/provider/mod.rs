//! Authentication providers and the manager that chains them.
//!
//! - `dao`: identifier/password checked against a `UserProvider`
//! - `anonymous`: anonymous tokens carrying the shared secret
//! - `remember_me`: tokens restored from a remember-me cookie
//! - `pre_authenticated`: principals vouched for upstream
//! - `manager`: `AuthenticationProviderManager`

use super::token::Token;
use crate::error::AuthResult;

pub mod anonymous;
pub mod dao;
pub mod manager;
pub mod pre_authenticated;
pub mod remember_me;

pub use anonymous::AnonymousAuthenticationProvider;
pub use dao::DaoAuthenticationProvider;
pub use manager::AuthenticationProviderManager;
pub use pre_authenticated::PreAuthenticatedAuthenticationProvider;
pub use remember_me::RememberMeAuthenticationProvider;

/// Turns an unauthenticated token into an authenticated one.
pub trait AuthenticationProvider: Send + Sync {
    /// Whether this provider knows how to authenticate `token`.
    fn supports(&self, token: &Token) -> bool;

    /// ## Summary
    /// Authenticate `token`, returning a new authenticated token.
    ///
    /// ## Errors
    /// Account status errors are terminal for the whole chain; any other
    /// authentication error lets the manager try the next provider.
    fn authenticate(&self, token: &Token) -> AuthResult<Token>;

    /// Name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared secret comparison for anonymous and remember-me tokens.
fn secret_matches(expected: &str, presented: &str) -> bool {
    expected.len() == presented.len()
        && expected
            .bytes()
            .zip(presented.bytes())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
