#![allow(clippy::expect_used)]
//! Token storage integration tests.
//!
//! The initializer stands in for a session lookup: it authenticates a
//! remember-me token the first time the token is needed.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use warden_test::component::auth::{Token, TokenStorage, UserProvider};
use warden_test::component::context::SecurityContext;

use super::helpers::*;

/// Registers an initializer that restores `identifier` from a remember-me
/// token and counts its runs.
fn restore_session(storage: &mut TokenStorage, context: &SecurityContext, identifier: &str) -> Rc<Cell<u32>> {
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let manager = Arc::clone(context.authentication_manager());
    let user = context
        .user_provider()
        .load_user_by_identifier(identifier)
        .expect("user exists");
    let cookie = context.remember_me_token(user);

    storage.set_initializer(move |storage| {
        counter.set(counter.get() + 1);
        if let Ok(token) = manager.authenticate(&cookie) {
            storage.set_token(Some(Arc::new(token)));
        }
    });
    runs
}

#[test_log::test]
fn session_is_restored_lazily_and_once() {
    let context = context();
    let mut storage = TokenStorage::new();
    let runs = restore_session(&mut storage, &context, "bob");

    assert_eq!(runs.get(), 0);
    assert!(storage.has_pending_initializer());

    let token = storage.token().expect("session restored");
    assert!(token.is_remember_me());
    assert_eq!(token.user_identifier(), "bob");

    storage.token();
    storage.token();
    assert_eq!(runs.get(), 1);
}

#[test_log::test]
fn failed_restore_leaves_storage_empty() {
    let context = context();
    let mut storage = TokenStorage::new();
    let runs = restore_session(&mut storage, &context, "carol");

    assert!(storage.token().is_none());
    assert!(storage.token().is_none());
    assert_eq!(runs.get(), 1);
}

#[test_log::test]
fn explicit_login_overrides_restored_session() {
    let context = context();
    let mut storage = TokenStorage::new();
    let runs = restore_session(&mut storage, &context, "bob");

    let alice = context
        .authentication_manager()
        .authenticate(&credentials(&context, "alice", PASSWORD))
        .expect("Failed to authenticate");
    storage.set_token(Some(Arc::new(alice)));

    // The pending restore ran first and was then overwritten.
    assert_eq!(runs.get(), 1);
    assert_eq!(
        storage.token().map(|t| t.user_identifier().to_string()),
        Some("alice".to_string())
    );
}

#[test_log::test]
fn clearing_discards_the_pending_restore() {
    let context = context();
    let mut storage = TokenStorage::new();
    let runs = restore_session(&mut storage, &context, "bob");

    storage.set_token(None);

    assert!(storage.token().is_none());
    assert_eq!(runs.get(), 0);
}

#[test_log::test]
fn reset_between_requests() {
    let context = context();
    let mut storage = TokenStorage::new();
    storage.set_token(Some(Arc::new(Token::anonymous(SECRET, std::iter::empty::<&str>()))));
    let runs = restore_session(&mut storage, &context, "bob");

    storage.reset();

    assert!(storage.token().is_none());
    assert!(!storage.has_pending_initializer());
    assert_eq!(runs.get(), 0);
}
