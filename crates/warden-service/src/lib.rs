//! Authentication and authorization services for Warden.
//!
//! Everything here is synchronous and request-scoped: a `TokenStorage` and
//! `Security` facade belong to one request, while the role hierarchy, voters,
//! providers and decision manager are immutable and can be shared through `Arc`.

pub mod auth;
pub mod error;
