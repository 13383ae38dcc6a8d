use std::any::Any;
use std::sync::Arc;

use warden_core::constants::ROLE_PREFIX;

use super::{Vote, Voter};
use crate::auth::{role_hierarchy::RoleHierarchy, token::Token};

/// Votes on attributes that look like roles (`ROLE_*` by default).
///
/// Abstains unless at least one attribute carries the prefix. Grants if the
/// token holds one of those roles, denies otherwise.
#[derive(Debug, Clone)]
pub struct RoleVoter {
    prefix: String,
}

impl RoleVoter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix(ROLE_PREFIX)
    }

    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn vote_on_roles<S: AsRef<str>>(&self, roles: &[S], attributes: &[&str]) -> Vote {
        let mut result = Vote::Abstain;

        for attribute in attributes {
            if !attribute.starts_with(&self.prefix) {
                continue;
            }
            result = Vote::Denied;
            if roles.iter().any(|role| role.as_ref() == *attribute) {
                return Vote::Granted;
            }
        }

        result
    }
}

impl Default for RoleVoter {
    fn default() -> Self {
        Self::new()
    }
}

impl Voter for RoleVoter {
    fn vote(&self, token: &Token, _subject: Option<&dyn Any>, attributes: &[&str]) -> Vote {
        self.vote_on_roles(token.role_names(), attributes)
    }

    fn name(&self) -> &'static str {
        "role"
    }
}

/// [`RoleVoter`] over the token's roles expanded through a [`RoleHierarchy`].
#[derive(Debug, Clone)]
pub struct RoleHierarchyVoter {
    inner: RoleVoter,
    hierarchy: Arc<RoleHierarchy>,
}

impl RoleHierarchyVoter {
    #[must_use]
    pub fn new(hierarchy: Arc<RoleHierarchy>) -> Self {
        Self {
            inner: RoleVoter::new(),
            hierarchy,
        }
    }

    #[must_use]
    pub fn with_prefix(hierarchy: Arc<RoleHierarchy>, prefix: impl Into<String>) -> Self {
        Self {
            inner: RoleVoter::with_prefix(prefix),
            hierarchy,
        }
    }
}

impl Voter for RoleHierarchyVoter {
    fn vote(&self, token: &Token, _subject: Option<&dyn Any>, attributes: &[&str]) -> Vote {
        let reachable = self.hierarchy.reachable_role_names(token.role_names());
        self.inner.vote_on_roles(&reachable, attributes)
    }

    fn name(&self) -> &'static str {
        "role_hierarchy"
    }
}
