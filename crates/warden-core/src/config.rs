use std::collections::HashMap;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::DEFAULT_FIREWALL;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Firewall name the configured providers are bound to.
    pub firewall: String,
    /// Role name to the roles it implies.
    #[serde(default)]
    pub role_hierarchy: HashMap<String, Vec<String>>,
    pub access_decision_manager: AccessDecisionConfig,
    pub erase_credentials: bool,
    pub hide_user_not_found: bool,
    pub always_authenticate_before_granting: bool,
    /// Shared secret anonymous tokens must carry. Random when not configured.
    #[serde(default = "random_secret")]
    pub anonymous_secret: String,
    /// In-memory users keyed by identifier.
    #[serde(default)]
    pub users: HashMap<String, UserConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessDecisionConfig {
    /// Kept as a string so an unsupported strategy is reported when the
    /// decision manager is built.
    pub strategy: String,
    pub allow_if_all_abstain: bool,
    pub allow_if_equal_granted_denied: bool,
}

impl Default for AccessDecisionConfig {
    fn default() -> Self {
        Self {
            strategy: crate::types::DecisionStrategy::default().as_str().to_string(),
            allow_if_all_abstain: false,
            allow_if_equal_granted_denied: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    /// Argon2 PHC hash of the password.
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub locked: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

const fn enabled_by_default() -> bool {
    true
}

fn random_secret() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

impl Settings {
    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = AccessDecisionConfig::default();
        Ok(Config::builder()
            .set_default("security.firewall", DEFAULT_FIREWALL)?
            .set_default("security.erase_credentials", true)?
            .set_default("security.hide_user_not_found", true)?
            .set_default("security.always_authenticate_before_granting", false)?
            .set_default("security.access_decision_manager.strategy", defaults.strategy)?
            .set_default(
                "security.access_decision_manager.allow_if_all_abstain",
                defaults.allow_if_all_abstain,
            )?
            .set_default(
                "security.access_decision_manager.allow_if_equal_granted_denied",
                defaults.allow_if_equal_granted_denied,
            )?
            .set_default("logging.level", "info")?)
    }

    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `config.toml` values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::with_prefix("WARDEN")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds settings from an inline TOML document on top of the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or does not match `Settings`.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(
        firewall = %settings.security.firewall,
        user_count = settings.security.users.len(),
        hierarchy_roots = settings.security.role_hierarchy.len(),
        "Settings loaded"
    );
    Ok(settings)
}
