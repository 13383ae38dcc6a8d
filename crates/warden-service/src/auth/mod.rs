//! Authentication and authorization flow.
//!
//! ## Module Organization
//!
//! - `checker`: `AuthorizationChecker`, re-authenticates and asks the decision manager
//! - `decision`: `AccessDecisionManager` and its strategies
//! - `password`: Password hashing and verification with Argon2
//! - `provider`: Authentication providers and `AuthenticationProviderManager`
//! - `role_hierarchy`: Transitive role expansion
//! - `security`: `Security` facade for the current request
//! - `token`: Authentication tokens
//! - `token_storage`: Request-scoped token holder with lazy initializer
//! - `user`: Users, user providers and account status checks
//! - `voter`: `Voter` trait and the built-in voters

pub mod checker;
pub mod decision;
pub mod password;
pub mod provider;
pub mod role_hierarchy;
pub mod security;
pub mod token;
pub mod token_storage;
pub mod user;
pub mod voter;

// Re-export commonly used types at module level
pub use checker::AuthorizationChecker;
pub use decision::AccessDecisionManager;
pub use provider::{
    AnonymousAuthenticationProvider, AuthenticationProvider, AuthenticationProviderManager,
    DaoAuthenticationProvider, PreAuthenticatedAuthenticationProvider,
    RememberMeAuthenticationProvider,
};
pub use role_hierarchy::RoleHierarchy;
pub use security::Security;
pub use token::{Principal, Token, TokenKind};
pub use token_storage::TokenStorage;
pub use user::{DefaultUserChecker, InMemoryUserProvider, User, UserChecker, UserProvider};
pub use voter::{AuthenticatedVoter, RoleHierarchyVoter, RoleVoter, Vote, Voter};
