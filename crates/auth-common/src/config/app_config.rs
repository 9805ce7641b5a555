//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::fmt;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// How the seed routine decides whether to link a group to its role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssociationPolicy {
    /// Link only when both the group and the role were created in this run.
    /// A link removed later is never restored.
    #[default]
    NewlyCreatedOnly,
    /// Link whenever no association row joins the pair.
    EnsureExists,
}

impl AssociationPolicy {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "newly_created_only" => Some(Self::NewlyCreatedOnly),
            "ensure_exists" => Some(Self::EnsureExists),
            _ => None,
        }
    }
}

/// Seed routine settings
#[derive(Clone, Default, Deserialize)]
pub struct SeedConfig {
    /// Run the schema bootstrap before seeding
    #[serde(default)]
    pub apply_schema: bool,
    #[serde(default)]
    pub association_policy: AssociationPolicy,
    /// Password for the seeded `admin` account; unusable when absent
    pub admin_password: Option<String>,
    /// Password for the seeded `user` account; unusable when absent
    pub user_password: Option<String>,
}

impl fmt::Debug for SeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |p: &Option<String>| p.as_ref().map(|_| "<redacted>");
        f.debug_struct("SeedConfig")
            .field("apply_schema", &self.apply_schema)
            .field("association_policy", &self.association_policy)
            .field("admin_password", &redact(&self.admin_password))
            .field("user_password", &redact(&self.user_password))
            .finish()
    }
}

// Default value functions
fn default_app_name() -> String {
    "auth-seed".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required keys are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed_u32 = |key: &'static str, default: fn() -> u32| -> Result<u32, ConfigError> {
            match lookup(key) {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(key, raw)),
                None => Ok(default()),
            }
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parsed_u32("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parsed_u32("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            seed: SeedConfig {
                apply_schema: match lookup("SEED_APPLY_SCHEMA") {
                    Some(raw) => parse_bool(&raw)
                        .ok_or(ConfigError::InvalidValue("SEED_APPLY_SCHEMA", raw))?,
                    None => false,
                },
                association_policy: match lookup("SEED_ASSOCIATION_POLICY") {
                    Some(raw) => AssociationPolicy::parse(&raw)
                        .ok_or(ConfigError::InvalidValue("SEED_ASSOCIATION_POLICY", raw))?,
                    None => AssociationPolicy::default(),
                },
                admin_password: lookup("SEED_ADMIN_PASSWORD").filter(|s| !s.is_empty()),
                user_password: lookup("SEED_USER_PASSWORD").filter(|s| !s.is_empty()),
            },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/auth")]))
                .unwrap();
        assert_eq!(config.app.name, "auth-seed");
        assert!(config.app.env.is_development());
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.min_connections, 1);
        assert!(!config.seed.apply_schema);
        assert_eq!(
            config.seed.association_policy,
            AssociationPolicy::NewlyCreatedOnly
        );
        assert!(config.seed.admin_password.is_none());
    }

    #[test]
    fn test_missing_database_url() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));
    }

    #[test]
    fn test_seed_settings() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/auth"),
            ("APP_ENV", "Production"),
            ("SEED_APPLY_SCHEMA", "yes"),
            ("SEED_ASSOCIATION_POLICY", "ensure_exists"),
            ("SEED_ADMIN_PASSWORD", "s3cret"),
            ("SEED_USER_PASSWORD", ""),
        ]))
        .unwrap();
        assert!(config.app.env.is_production());
        assert!(config.seed.apply_schema);
        assert_eq!(config.seed.association_policy, AssociationPolicy::EnsureExists);
        assert_eq!(config.seed.admin_password.as_deref(), Some("s3cret"));
        assert!(config.seed.user_password.is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/auth"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS", _)));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/auth"),
            ("SEED_ASSOCIATION_POLICY", "sometimes"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("SEED_ASSOCIATION_POLICY", _)));
    }

    #[test]
    fn test_seed_debug_redacts_passwords() {
        let seed = SeedConfig {
            admin_password: Some("s3cret".to_string()),
            ..SeedConfig::default()
        };
        let rendered = format!("{seed:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
