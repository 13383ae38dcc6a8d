#![allow(clippy::expect_used)]
//! Settings and wiring tests.

use warden_test::component::DecisionStrategy;
use warden_test::component::config::{Settings, log_filter_directive};
use warden_test::component::constants::DEFAULT_FIREWALL;
use warden_test::component::context::SecurityContext;

use super::helpers::*;

#[test_log::test]
fn defaults_apply_to_an_empty_document() {
    let settings = Settings::from_toml("").expect("defaults are complete");

    assert_eq!(settings.security.firewall, DEFAULT_FIREWALL);
    assert!(settings.security.erase_credentials);
    assert!(settings.security.hide_user_not_found);
    assert!(!settings.security.always_authenticate_before_granting);
    assert_eq!(settings.security.access_decision_manager.strategy, "affirmative");
    assert!(!settings.security.access_decision_manager.allow_if_all_abstain);
    assert!(settings.security.access_decision_manager.allow_if_equal_granted_denied);
    assert!(!settings.security.anonymous_secret.is_empty());
    assert!(settings.security.users.is_empty());
    assert_eq!(log_filter_directive(&settings), "info");
}

#[test_log::test]
fn strategy_from_settings() {
    let context = context_with(
        r#"access_decision_manager = { strategy = "unanimous", allow_if_all_abstain = true, allow_if_equal_granted_denied = false }"#,
    );

    assert_eq!(context.decision_manager().strategy(), DecisionStrategy::Unanimous);
}

#[test_log::test]
fn unsupported_strategy_fails_wiring() {
    let settings = settings_with(
        r#"access_decision_manager = { strategy = "majority", allow_if_all_abstain = false, allow_if_equal_granted_denied = true }"#,
    );

    assert!(SecurityContext::from_config(&settings.security).is_err());
}

#[test_log::test]
fn users_are_loaded_from_settings() {
    let context = context();

    assert_eq!(context.user_provider().len(), 4);
    assert_eq!(log_filter_directive(&settings()), "debug");
}
