//! Voters cast a [`Vote`] on whether a token may access a subject.
//!
//! - `role`: `RoleVoter` and `RoleHierarchyVoter` for `ROLE_*` attributes
//! - `authenticated`: `AuthenticatedVoter` for authentication-level attributes

use std::any::Any;

use super::token::Token;

pub mod authenticated;
pub mod role;

pub use authenticated::AuthenticatedVoter;
pub use role::{RoleHierarchyVoter, RoleVoter};

/// Outcome of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vote {
    Granted,
    Denied,
    /// The voter has no opinion on these attributes.
    Abstain,
}

impl Vote {
    /// Numeric form: granted `1`, abstain `0`, denied `-1`.
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Granted => 1,
            Self::Abstain => 0,
            Self::Denied => -1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Abstain => "abstain",
        }
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pluggable access rule.
///
/// `subject` is whatever the caller is protecting (a document, a route name);
/// voters downcast it to the types they understand.
pub trait Voter: Send + Sync {
    fn vote(&self, token: &Token, subject: Option<&dyn Any>, attributes: &[&str]) -> Vote;

    /// Name used in decision logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
