#![allow(clippy::expect_used)]
//! Authorization integration tests.
//!
//! Covers the decision strategies with canned voters, and the built-in voters
//! wired from configuration (role hierarchy and authentication level).

use std::any::Any;
use std::sync::Arc;

use warden_test::component::DecisionStrategy;
use warden_test::component::auth::{
    AccessDecisionManager, AuthenticatedVoter, RoleHierarchy, RoleHierarchyVoter, RoleVoter,
    Token, Vote, Voter,
};
use warden_test::component::constants::{
    IS_AUTHENTICATED_ANONYMOUSLY, IS_AUTHENTICATED_FULLY, IS_AUTHENTICATED_REMEMBERED,
    PUBLIC_ACCESS,
};

use super::helpers::*;

use Vote::{Abstain, Denied, Granted};

// ============================================================================
// Strategies
// ============================================================================

#[test_log::test]
fn affirmative_one_grant_is_enough() {
    let token = any_token();

    assert!(manager(DecisionStrategy::Affirmative, &[Denied, Granted], false, true).decide(&token, &["X"], None));
    assert!(!manager(DecisionStrategy::Affirmative, &[Denied, Abstain], true, true).decide(&token, &["X"], None));
    assert!(!manager(DecisionStrategy::Affirmative, &[Abstain, Abstain], false, true).decide(&token, &["X"], None));
    assert!(manager(DecisionStrategy::Affirmative, &[Abstain, Abstain], true, true).decide(&token, &["X"], None));
}

#[test_log::test]
fn consensus_majority_and_ties() {
    let token = any_token();

    assert!(manager(DecisionStrategy::Consensus, &[Granted, Granted, Denied], false, false).decide(&token, &["X"], None));
    assert!(!manager(DecisionStrategy::Consensus, &[Granted, Denied, Denied], true, true).decide(&token, &["X"], None));

    assert!(manager(DecisionStrategy::Consensus, &[Granted, Denied], false, true).decide(&token, &["X"], None));
    assert!(!manager(DecisionStrategy::Consensus, &[Granted, Denied], false, false).decide(&token, &["X"], None));

    assert!(!manager(DecisionStrategy::Consensus, &[Abstain, Abstain], false, true).decide(&token, &["X"], None));
    assert!(manager(DecisionStrategy::Consensus, &[Abstain, Abstain], true, false).decide(&token, &["X"], None));
}

#[test_log::test]
fn unanimous_any_denial_wins() {
    let token = any_token();

    assert!(!manager(DecisionStrategy::Unanimous, &[Granted, Denied], false, true).decide(&token, &["X"], None));
    assert!(manager(DecisionStrategy::Unanimous, &[Granted, Abstain], false, true).decide(&token, &["X"], None));
    assert!(!manager(DecisionStrategy::Unanimous, &[Abstain, Abstain], false, true).decide(&token, &["X"], None));
    assert!(manager(DecisionStrategy::Unanimous, &[Abstain, Abstain], true, true).decide(&token, &["X"], None));
}

#[test_log::test]
fn priority_first_opinion_decides() {
    let token = any_token();

    assert!(!manager(DecisionStrategy::Priority, &[Abstain, Denied, Granted], false, true).decide(&token, &["X"], None));
    assert!(manager(DecisionStrategy::Priority, &[Abstain, Granted, Denied], false, true).decide(&token, &["X"], None));
    assert!(manager(DecisionStrategy::Priority, &[Abstain], true, true).decide(&token, &["X"], None));
}

/// Denies one attribute, grants everything else.
struct DenyAttributeVoter(&'static str);

impl Voter for DenyAttributeVoter {
    fn vote(&self, _token: &Token, _subject: Option<&dyn Any>, attributes: &[&str]) -> Vote {
        if attributes.contains(&self.0) { Denied } else { Granted }
    }
}

#[test_log::test]
fn unanimous_asks_about_each_attribute_separately() {
    let token = any_token();
    let voters = || vec![Arc::new(DenyAttributeVoter("DELETE")) as Arc<dyn Voter>];

    let unanimous = AccessDecisionManager::new(voters(), DecisionStrategy::Unanimous, false, true)
        .expect("voters configured");
    let affirmative = AccessDecisionManager::new(voters(), DecisionStrategy::Affirmative, false, true)
        .expect("voters configured");

    assert!(unanimous.decide(&token, &["EDIT"], None));
    assert!(!unanimous.decide(&token, &["EDIT", "DELETE"], None));
    // Asked with both attributes at once, the voter denies.
    assert!(!affirmative.decide(&token, &["EDIT", "DELETE"], None));
}

#[test_log::test]
fn empty_voter_list_is_rejected() {
    assert!(AccessDecisionManager::new(vec![], DecisionStrategy::Affirmative, false, true).is_err());

    let mut manager = manager(DecisionStrategy::Affirmative, &[Granted], false, true);
    assert!(manager.set_voters(vec![]).is_err());
    assert_eq!(manager.voter_count(), 1);
}

#[test_log::test]
fn unknown_strategy_name_is_rejected() {
    assert!(AccessDecisionManager::with_strategy_name(fixed_voters(&[Granted]), "majority", false, true).is_err());
    assert!(AccessDecisionManager::with_strategy_name(fixed_voters(&[Granted]), "Unanimous", false, true).is_ok());
}

// ============================================================================
// Subjects
// ============================================================================

struct Document {
    owner: String,
}

/// Grants `EDIT` on documents the token's user owns.
struct OwnerVoter;

impl Voter for OwnerVoter {
    fn vote(&self, token: &Token, subject: Option<&dyn Any>, attributes: &[&str]) -> Vote {
        let Some(document) = subject.and_then(|s| s.downcast_ref::<Document>()) else {
            return Abstain;
        };
        if !attributes.contains(&"EDIT") {
            return Abstain;
        }
        if document.owner == token.user_identifier() { Granted } else { Denied }
    }
}

#[test_log::test]
fn voters_can_inspect_the_subject() {
    let manager = AccessDecisionManager::new(
        vec![Arc::new(OwnerVoter) as Arc<dyn Voter>, Arc::new(RoleVoter::new())],
        DecisionStrategy::Affirmative,
        false,
        true,
    )
    .expect("voters configured");
    let token = any_token();

    let own = Document { owner: "alice".to_string() };
    let foreign = Document { owner: "bob".to_string() };

    assert!(manager.decide(&token, &["EDIT"], Some(&own)));
    assert!(!manager.decide(&token, &["EDIT"], Some(&foreign)));
    assert!(!manager.decide(&token, &["EDIT"], None));
    assert!(!manager.decide(&token, &["EDIT"], Some(&"not a document")));
}

// ============================================================================
// Built-in voters from configuration
// ============================================================================

#[test_log::test]
fn hierarchy_is_expanded_transitively() {
    let context = context();
    let mut security = context.security();
    security
        .login(&credentials(&context, "alice", PASSWORD))
        .expect("Failed to log in");

    for role in ["ROLE_SUPER_ADMIN", "ROLE_ADMIN", "ROLE_USER", "ROLE_MODERATOR", "ROLE_ALLOWED_TO_SWITCH"] {
        assert!(security.is_granted(role, None).expect("decided"), "{role} should be reachable");
    }
    assert!(!security.is_granted("ROLE_AUDITOR", None).expect("decided"));
}

#[test_log::test]
fn hierarchy_does_not_grant_upwards() {
    let context = context();
    let mut security = context.security();
    security
        .login(&credentials(&context, "bob", PASSWORD))
        .expect("Failed to log in");

    assert!(security.is_granted("ROLE_USER", None).expect("decided"));
    assert!(!security.is_granted("ROLE_ADMIN", None).expect("decided"));
}

#[test_log::test]
fn cyclic_hierarchy_terminates() {
    let hierarchy = Arc::new(RoleHierarchy::new([
        ("ROLE_A", vec!["ROLE_B"]),
        ("ROLE_B", vec!["ROLE_C"]),
        ("ROLE_C", vec!["ROLE_A"]),
    ]));
    let manager = AccessDecisionManager::new(
        vec![Arc::new(RoleHierarchyVoter::new(Arc::clone(&hierarchy))) as Arc<dyn Voter>],
        DecisionStrategy::Affirmative,
        false,
        true,
    )
    .expect("voters configured");
    let token = Token::pre_authenticated("svc", None, "main", ["ROLE_B"]);

    assert!(manager.decide(&token, &["ROLE_A"], None));
    assert!(manager.decide(&token, &["ROLE_C"], None));

    let mut reachable = hierarchy.reachable_role_names(&["ROLE_A"]);
    reachable.sort();
    assert_eq!(reachable, vec!["ROLE_A", "ROLE_B", "ROLE_C"]);
}

#[test_log::test]
fn authentication_levels() {
    let context = context();
    let voters = vec![Arc::new(AuthenticatedVoter::new()) as Arc<dyn Voter>];
    let manager = AccessDecisionManager::new(voters, DecisionStrategy::Affirmative, false, true)
        .expect("voters configured");

    let full = context
        .authentication_manager()
        .authenticate(&credentials(&context, "bob", PASSWORD))
        .expect("Failed to authenticate");
    let anonymous = context
        .authentication_manager()
        .authenticate(&context.anonymous_token())
        .expect("Failed to authenticate anonymously");

    assert!(manager.decide(&full, &[IS_AUTHENTICATED_FULLY], None));
    assert!(manager.decide(&full, &[IS_AUTHENTICATED_REMEMBERED], None));
    assert!(!manager.decide(&anonymous, &[IS_AUTHENTICATED_REMEMBERED], None));
    assert!(manager.decide(&anonymous, &[IS_AUTHENTICATED_ANONYMOUSLY], None));
    assert!(manager.decide(&Token::null(), &[PUBLIC_ACCESS], None));
    assert!(!manager.decide(&Token::null(), &[IS_AUTHENTICATED_ANONYMOUSLY], None));
}
