//! # auth-common
//!
//! Shared utilities including configuration, error handling, password
//! hashing, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, is_password_usable, make_unusable_password, verify_password, PasswordService,
    UNUSABLE_PASSWORD_PREFIX,
};
pub use config::{
    AppConfig, AppSettings, AssociationPolicy, ConfigError, DatabaseConfig, Environment,
    SeedConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
