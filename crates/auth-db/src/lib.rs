//! # auth-db
//!
//! Storage layer implementing the `auth-core` repository traits.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Idempotent schema bootstrap (`CREATE TABLE IF NOT EXISTS`)
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - PostgreSQL repositories (`Pg*Repository`)
//! - A lock-protected in-memory store with the same semantics, for tests and
//!   dry runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_common::AppConfig;
//! use auth_core::traits::RoleRepository;
//! use auth_db::{apply_schema, create_pool, PgRoleRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = create_pool(&config.database).await?;
//!     apply_schema(&pool).await?;
//!
//!     let roles = PgRoleRepository::new(pool);
//!     let (admin, created) = roles.get_or_create("admin", "Administrator").await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use memory::{
    MemoryGroupRepository, MemoryGroupRoleRepository, MemoryMembershipRepository,
    MemoryRoleRepository, MemoryStore, MemoryUserHistoryRepository, MemoryUserRepository,
};
pub use pool::{create_pool, PgPool};
pub use repositories::{
    PgGroupRepository, PgGroupRoleRepository, PgMembershipRepository, PgRoleRepository,
    PgUserHistoryRepository, PgUserRepository,
};
pub use schema::apply_schema;
