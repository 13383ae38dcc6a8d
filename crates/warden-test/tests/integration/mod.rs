//! Cross-crate tests for authentication and authorization.
//!
//! Every test builds its own `SecurityContext` from an inline TOML document,
//! so tests are independent and can run in parallel.

mod authorization;
mod config;
mod helpers;
mod token_storage;
