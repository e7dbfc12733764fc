//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate. Each
//! sub-module represents a logical configuration section; every field has a
//! default so an empty file yields a runnable development setup.

pub mod app;
pub mod auth;
pub mod database;
pub mod guard;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, FederationConfig};
pub use self::database::DatabaseConfig;
pub use self::guard::GuardConfig;
pub use self::logging::{LogFormat, LoggingConfig};

use crate::error::AppError;

/// Prefix of environment variables overriding file configuration.
pub const ENV_PREFIX: &str = "CLICKAULAS";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Route guard settings.
    #[serde(default)]
    pub guard: GuardConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, an environment-specific overlay
    /// `config/{env}` and environment variables prefixed with `CLICKAULAS__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        tracing::debug!(env = %env, "Configuration loaded");
        Ok(loaded)
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.credential_length, 8);
        assert_eq!(config.auth.password_min_length, 6);
        assert_eq!(config.auth.session_ttl_hours, 720);
        assert!(!config.auth.federation.enabled);
        assert_eq!(config.guard.protected_prefixes, vec!["/api/admin", "/admin"]);
        assert_eq!(config.guard.home_path, "/admin");
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [database]
            url = "memory://"

            [auth]
            admin_email = "Director@School.org"

            [logging]
            format = "pretty"
            "#,
        )
        .unwrap();

        assert!(config.database.is_memory());
        assert!(config.auth.is_admin_email("director@school.org"));
        assert!(!config.auth.is_admin_email("teacher@school.org"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_no_admin_email_matches_nobody() {
        let config = AppConfig::default();
        assert!(!config.auth.is_admin_email("anyone@school.org"));
    }
}
