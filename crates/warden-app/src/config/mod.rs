//! Settings re-exported from `warden-core`, plus the glue that turns them
//! into log filters.

pub use warden_core::config::*;

/// ## Summary
/// The `tracing` filter directive for the configured log level.
///
/// Unknown levels fall back to `info` with a warning, so a typo in the
/// configuration never silences logging entirely.
#[must_use]
pub fn log_filter_directive(settings: &Settings) -> String {
    let level = settings.logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => level,
        _ if level.contains('=') => level,
        _ => {
            tracing::warn!(level = %settings.logging.level, "Unknown log level in config, using info");
            "info".to_string()
        }
    }
}
