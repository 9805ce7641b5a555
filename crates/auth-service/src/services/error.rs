//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use auth_common::AppError;
use auth_core::DomainError;
use std::fmt;
use validator::ValidationErrors;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation (uniqueness, missing rows, storage failures)
    Domain(DomainError),

    /// Application error (hashing, configuration)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Validation error
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The wrapped domain error, if any
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) | Self::App(AppError::Domain(e)) => Some(e),
            _ => None,
        }
    }

    /// Check for a uniqueness violation on the given entity field
    pub fn is_duplicate_of(&self, entity: &str, field: &str) -> bool {
        self.as_domain()
            .is_some_and(|e| e.is_duplicate_of(entity, field))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            _ => self.as_domain().is_some_and(DomainError::is_not_found),
        }
    }

    /// Get the error code for logs and reports
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use auth_core::UserId;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("User", "123");
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("User not found: 123"));
    }

    #[test]
    fn test_domain_errors_pass_through() {
        let err = ServiceError::from(DomainError::duplicate("User", "username", "admin"));
        assert_eq!(err.error_code(), "UNIQUENESS_VIOLATION");
        assert!(err.is_duplicate_of("User", "username"));
        assert!(!err.is_duplicate_of("User", "email"));

        let err = ServiceError::from(DomainError::UserNotFound(UserId::new(4)));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_app_wrapped_domain_error_is_visible() {
        let err = ServiceError::App(AppError::Domain(DomainError::duplicate("Role", "name", "x")));
        assert!(err.is_duplicate_of("Role", "name"));
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("Username must be 1-255 characters");
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::not_found("Group", "456").into();
        assert_eq!(app_err.error_code(), "NOT_FOUND");

        let app_err: AppError = ServiceError::from(DomainError::duplicate("Group", "name", "g")).into();
        assert_eq!(app_err.error_code(), "UNIQUENESS_VIOLATION");

        let app_err: AppError = ServiceError::validation("Role name must be 1-255 characters").into();
        assert_eq!(app_err.error_code(), "VALIDATION_ERROR");
    }
}
