#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Building settings and a `SecurityContext` from inline TOML
//! - Voters with a fixed answer, for strategy tests

use std::any::Any;
use std::sync::{Arc, OnceLock};

use warden_test::component::auth::{
    AccessDecisionManager, Token, Vote, Voter, password::hash_password,
};
use warden_test::component::config::Settings;
use warden_test::component::context::SecurityContext;
use warden_test::component::DecisionStrategy;

pub const PASSWORD: &str = "wonderland";
pub const SECRET: &str = "integration-secret";

/// Argon2 is slow on purpose; hash the shared test password once.
pub fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(PASSWORD).expect("Failed to hash password"))
}

/// ## Summary
/// Settings with four users and a three level hierarchy.
///
/// - `alice`: `ROLE_SUPER_ADMIN`
/// - `bob`: `ROLE_USER`
/// - `carol`: `ROLE_USER`, locked
/// - `dave`: `ROLE_USER`, disabled
///
/// `extra` is appended to the `[security]` table.
pub fn settings_with(extra: &str) -> Settings {
    let hash = password_hash();
    Settings::from_toml(&format!(
        r#"
        [logging]
        level = "debug"

        [security]
        anonymous_secret = "{SECRET}"
        {extra}

        [security.role_hierarchy]
        ROLE_ADMIN = ["ROLE_USER", "ROLE_MODERATOR"]
        ROLE_SUPER_ADMIN = ["ROLE_ADMIN", "ROLE_ALLOWED_TO_SWITCH"]

        [security.users.alice]
        password = "{hash}"
        roles = ["ROLE_SUPER_ADMIN"]

        [security.users.bob]
        password = "{hash}"
        roles = ["ROLE_USER"]

        [security.users.carol]
        password = "{hash}"
        roles = ["ROLE_USER"]
        locked = true

        [security.users.dave]
        password = "{hash}"
        roles = ["ROLE_USER"]
        enabled = false
        "#
    ))
    .expect("Failed to build settings")
}

pub fn settings() -> Settings {
    settings_with("")
}

pub fn context_with(extra: &str) -> SecurityContext {
    SecurityContext::from_config(&settings_with(extra).security)
        .expect("Failed to build security context")
}

pub fn context() -> SecurityContext {
    context_with("")
}

/// A token as presented at login, before any provider has seen it.
pub fn credentials(context: &SecurityContext, identifier: &str, password: &str) -> Token {
    context.credentials_token(identifier, password)
}

/// Voter that always answers the same way.
pub struct FixedVoter(pub Vote);

impl Voter for FixedVoter {
    fn vote(&self, _token: &Token, _subject: Option<&dyn Any>, _attributes: &[&str]) -> Vote {
        self.0
    }
}

pub fn fixed_voters(votes: &[Vote]) -> Vec<Arc<dyn Voter>> {
    votes
        .iter()
        .map(|vote| Arc::new(FixedVoter(*vote)) as Arc<dyn Voter>)
        .collect()
}

pub fn manager(
    strategy: DecisionStrategy,
    votes: &[Vote],
    allow_if_all_abstain: bool,
    allow_if_equal_granted_denied: bool,
) -> AccessDecisionManager {
    AccessDecisionManager::new(
        fixed_voters(votes),
        strategy,
        allow_if_all_abstain,
        allow_if_equal_granted_denied,
    )
    .expect("Failed to build decision manager")
}

pub fn any_token() -> Token {
    Token::username_password("alice", "", "main", ["ROLE_USER"])
}
