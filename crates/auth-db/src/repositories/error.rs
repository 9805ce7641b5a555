//! Error handling utilities for repositories

use auth_core::error::DomainError;
use auth_core::value_objects::{GroupId, GroupRoleId, RoleId, UserId};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and hand the violated constraint name to
/// `on_unique`; everything else becomes a database error
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    map_db_error(e)
}

/// Check for a foreign key violation, same contract as `map_unique_violation`
pub fn map_foreign_key_violation<F>(e: SqlxError, on_missing: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_missing(db_err.constraint());
        }
    }
    map_db_error(e)
}

/// Create a "user not found" error
pub fn user_not_found(id: UserId) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "role not found" error
pub fn role_not_found(id: RoleId) -> DomainError {
    DomainError::RoleNotFound(id)
}

/// Create a "group not found" error
pub fn group_not_found(id: GroupId) -> DomainError {
    DomainError::GroupNotFound(id)
}

/// Create a "group role not found" error
pub fn group_role_not_found(id: GroupRoleId) -> DomainError {
    DomainError::GroupRoleNotFound(id)
}
