use std::io::Write;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};
use tracing_unwrap::ResultExt;
use warden_app::{
    config::{load_config, log_filter_directive},
    context::SecurityContext,
    error::AppError,
};

const USAGE: &str = "warden <username> <password> <attribute>...";

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = load_config()?;

    let directive = log_filter_directive(&config);
    match EnvFilter::try_new(&directive) {
        Ok(filter) => {
            if let Err(e) = filter_handle.modify(|current| *current = filter) {
                tracing::warn!(error = %e, "Failed to update log filter from config");
            }
        }
        Err(e) => tracing::warn!(error = %e, level = %directive, "Invalid log filter, keeping debug"),
    }

    let mut args = std::env::args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        return Err(AppError::Usage(USAGE.to_string()).into());
    };
    let attributes: Vec<String> = args.collect();
    if attributes.is_empty() {
        return Err(AppError::Usage(USAGE.to_string()).into());
    }

    let context = SecurityContext::from_config(&config.security)?;
    let mut security = context.security();

    let token = security
        .login(&context.credentials_token(&username, &password))
        .map_err(AppError::from)?;
    tracing::info!(user = %token.user_identifier(), roles = ?token.role_names(), "Authenticated");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for attribute in &attributes {
        let granted = security
            .is_granted(attribute, None)
            .map_err(AppError::from)?;
        writeln!(out, "{attribute}: {}", if granted { "granted" } else { "denied" }).ok_or_log();
    }

    Ok(())
}
