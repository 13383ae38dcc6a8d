//! Warden - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! `warden_test::component::` paths.

#![allow(ambiguous_glob_reexports)]

pub mod component {
    pub use warden_core::*;
    pub use warden_service::*;

    // Re-export config from both core and app
    pub mod config {
        pub use warden_app::config::log_filter_directive;
        pub use warden_core::config::*;
    }

    pub mod context {
        pub use warden_app::context::*;
    }
}

pub use warden_app as app;
