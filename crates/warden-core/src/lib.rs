//! Shared types for the Warden security core.
//!
//! ## Module Organization
//!
//! - `config`: Settings loaded from the environment and `config.toml`
//! - `constants`: Role prefix and authentication-level attribute names
//! - `error`: Core error type
//! - `role`: The `Role` value type
//! - `types`: Access decision strategies

pub mod config;
pub mod constants;
pub mod error;
pub mod role;
pub mod types;

pub use role::Role;
pub use types::DecisionStrategy;
