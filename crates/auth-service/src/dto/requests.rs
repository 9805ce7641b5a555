//! Request DTOs for the user factory and the user service
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use std::fmt;

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

// ============================================================================
// User Factory Requests
// ============================================================================

/// Optional attributes applied on top of the factory defaults
///
/// The staff and superuser flags are decided by the factory method and cannot
/// be set here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ExtraFields {
    /// Free-text position label
    #[validate(length(max = 255, message = "Role must be at most 255 characters"))]
    pub role: Option<String>,

    /// Defaults to active when absent
    pub is_active: Option<bool>,
}

/// Input for `UserFactory::create_user` and `UserFactory::create_superuser`
#[derive(Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Username must be 1-255 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 255, message = "Email must be 1-255 characters"))]
    pub email: String,

    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 255, message = "Last name must be at most 255 characters"))]
    pub last_name: Option<String>,

    /// Plaintext; `None` stores an unusable password
    pub password: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub extra: ExtraFields,
}

impl CreateUserRequest {
    /// Request with the required fields and no password
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            name: Some(name.into()),
            last_name: Some(last_name.into()),
            password: None,
            extra: ExtraFields::default(),
        }
    }

    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.extra.role = Some(role.into());
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.extra.is_active = Some(is_active);
        self
    }
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("last_name", &self.last_name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("extra", &self.extra)
            .finish()
    }
}

// ============================================================================
// User Service Requests
// ============================================================================

/// Profile update; `None` leaves a field untouched
///
/// For the nullable columns, `Some(None)` clears the value. In JSON an
/// absent key leaves the field alone and an explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_nullable_lengths"))]
pub struct UserChanges {
    #[validate(length(min = 1, max = 255, message = "Email must be 1-255 characters"))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "present_or_null")]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "present_or_null")]
    pub last_name: Option<Option<String>>,

    #[serde(default, deserialize_with = "present_or_null")]
    pub role: Option<Option<String>>,
}

/// Only runs for keys present in the input, so `null` becomes `Some(None)`
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UserChanges {
    /// Check if no field is set
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.last_name.is_none() && self.role.is_none()
    }
}

const MAX_TEXT_LENGTH: usize = 255;

fn validate_nullable_lengths(changes: &UserChanges) -> Result<(), ValidationError> {
    let fields = [
        ("name", &changes.name),
        ("last_name", &changes.last_name),
        ("role", &changes.role),
    ];

    for (field, value) in fields {
        if let Some(Some(text)) = value {
            if text.chars().count() > MAX_TEXT_LENGTH {
                let mut err = ValidationError::new("length");
                err.message = Some(format!("{field} must be at most 255 characters").into());
                return Err(err);
            }
        }
    }
    Ok(())
}
