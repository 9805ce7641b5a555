//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{GroupId, GroupRoleId, RoleId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Role not found: {0}")]
    RoleNotFound(RoleId),

    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Group role not found: {0}")]
    GroupRoleNotFound(GroupRoleId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    /// A unique column already holds the value
    #[error("{entity} with {field} '{value}' already exists")]
    UniquenessViolation {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Build a uniqueness violation
    pub fn duplicate(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::UniquenessViolation {
            entity,
            field,
            value: value.into(),
        }
    }

    /// Get an error code string
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RoleNotFound(_) => "UNKNOWN_ROLE",
            Self::GroupNotFound(_) => "UNKNOWN_GROUP",
            Self::GroupRoleNotFound(_) => "UNKNOWN_GROUP_ROLE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Conflict
            Self::UniquenessViolation { .. } => "UNIQUENESS_VIOLATION",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::RoleNotFound(_)
                | Self::GroupNotFound(_)
                | Self::GroupRoleNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UniquenessViolation { .. })
    }

    /// Check if this violation concerns the given entity field
    pub fn is_duplicate_of(&self, entity: &str, field: &str) -> bool {
        matches!(
            self,
            Self::UniquenessViolation { entity: e, field: f, .. } if *e == entity && *f == field
        )
    }
}
