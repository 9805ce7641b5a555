//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AssociationPolicy, ConfigError, DatabaseConfig, Environment,
    SeedConfig,
};
