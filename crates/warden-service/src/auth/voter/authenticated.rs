use std::any::Any;

use warden_core::constants::{
    IS_ANONYMOUS, IS_AUTHENTICATED_ANONYMOUSLY, IS_AUTHENTICATED_FULLY,
    IS_AUTHENTICATED_REMEMBERED, IS_REMEMBERED, PUBLIC_ACCESS,
};

use super::{Vote, Voter};
use crate::auth::token::Token;

const SUPPORTED: [&str; 6] = [
    IS_AUTHENTICATED_FULLY,
    IS_AUTHENTICATED_REMEMBERED,
    IS_AUTHENTICATED_ANONYMOUSLY,
    PUBLIC_ACCESS,
    IS_ANONYMOUS,
    IS_REMEMBERED,
];

/// Votes on how strongly the token was authenticated.
///
/// Trust levels nest: a fully authenticated token also satisfies
/// `IS_AUTHENTICATED_REMEMBERED` and `IS_AUTHENTICATED_ANONYMOUSLY`, a
/// remember-me token satisfies `IS_AUTHENTICATED_ANONYMOUSLY`.
/// `PUBLIC_ACCESS` is granted to everyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticatedVoter;

impl AuthenticatedVoter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Voter for AuthenticatedVoter {
    fn vote(&self, token: &Token, _subject: Option<&dyn Any>, attributes: &[&str]) -> Vote {
        let mut result = Vote::Abstain;

        for attribute in attributes {
            if !SUPPORTED.contains(attribute) {
                continue;
            }
            if *attribute == PUBLIC_ACCESS {
                return Vote::Granted;
            }

            result = Vote::Denied;

            let full = token.is_fully_authenticated();
            let remembered = token.is_remember_me();
            let anonymous = token.is_anonymous();

            let granted = match *attribute {
                IS_AUTHENTICATED_FULLY => full,
                IS_AUTHENTICATED_REMEMBERED => full || remembered,
                IS_AUTHENTICATED_ANONYMOUSLY => full || remembered || anonymous,
                IS_REMEMBERED => remembered,
                IS_ANONYMOUS => anonymous,
                _ => false,
            };
            if granted {
                return Vote::Granted;
            }
        }

        result
    }

    fn name(&self) -> &'static str {
        "authenticated"
    }
}
