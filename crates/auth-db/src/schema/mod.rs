//! Schema bootstrap
//!
//! A single idempotent script that creates the account tables when they are
//! missing. There is no versioning and no down path.

use sqlx::PgPool;
use tracing::{info, instrument};

/// The bootstrap script
pub const SCHEMA_SQL: &str = include_str!("auth_schema.sql");

/// Unique constraint on `users.username`
pub const USERS_USERNAME_KEY: &str = "users_username_key";
/// Unique constraint on `users.email`
pub const USERS_EMAIL_KEY: &str = "users_email_key";
/// Unique constraint on `custom_roles.name`
pub const CUSTOM_ROLES_NAME_KEY: &str = "custom_roles_name_key";
/// Unique constraint on `auth_groups.name`
pub const AUTH_GROUPS_NAME_KEY: &str = "auth_groups_name_key";
/// Foreign key from `user_groups.user_id` to `users.id`
pub const USER_GROUPS_USER_FKEY: &str = "user_groups_user_id_fkey";
/// Foreign key from `group_roles.role_id` to `custom_roles.id`
pub const GROUP_ROLES_ROLE_FKEY: &str = "group_roles_role_id_fkey";

/// Every table the script creates, in dependency order
pub const TABLES: [&str; 6] = [
    "users",
    "custom_roles",
    "auth_groups",
    "group_roles",
    "user_groups",
    "user_history",
];

/// Run the bootstrap script against the pool
#[instrument(skip(pool))]
pub async fn apply_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    info!(tables = TABLES.len(), "Schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_is_idempotent() {
        for statement in SCHEMA_SQL.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let body: String = statement
                .lines()
                .filter(|line| !line.trim_start().starts_with("--"))
                .collect::<Vec<_>>()
                .join("\n");
            let body = body.trim();
            if body.is_empty() {
                continue;
            }
            assert!(body.contains("IF NOT EXISTS"), "not idempotent: {body}");
        }
    }

    #[test]
    fn test_script_creates_every_table() {
        for table in TABLES {
            let needle = format!("CREATE TABLE IF NOT EXISTS {table} (");
            assert!(SCHEMA_SQL.contains(&needle), "missing table {table}");
        }
    }

    #[test]
    fn test_constraint_names_match_script() {
        for name in [
            USERS_USERNAME_KEY,
            USERS_EMAIL_KEY,
            CUSTOM_ROLES_NAME_KEY,
            AUTH_GROUPS_NAME_KEY,
            USER_GROUPS_USER_FKEY,
            GROUP_ROLES_ROLE_FKEY,
        ] {
            assert!(SCHEMA_SQL.contains(name), "missing constraint {name}");
        }
    }
}
