//! Configuration-driven wiring for Warden.
//!
//! ## Module Organization
//!
//! - `config`: Settings from `config.toml` and the environment
//! - `context`: `SecurityContext`, the shared services built from settings
//! - `error`: Application error type

pub mod config;
pub mod context;
pub mod error;
