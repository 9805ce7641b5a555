//! User entity - an authenticatable principal

use chrono::{DateTime, Utc};
use std::fmt;

use crate::value_objects::UserId;

use super::history::UserField;

/// User account
///
/// The password hash is deliberately not part of the entity; it is only
/// reachable through `UserRepository::get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// Login key and natural key
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub last_name: Option<String>,
    /// Free-text position label, unrelated to `Role` records
    pub role: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Natural key used for lookups by login name
    #[inline]
    pub fn natural_key(&self) -> &str {
        &self.username
    }

    /// Given name and last name joined by a space
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }

    /// Update the email, returning the changed field if the value differs
    pub fn set_email(&mut self, email: String) -> Option<UserField> {
        if self.email == email {
            return None;
        }
        self.email = email;
        self.touch();
        Some(UserField::Email)
    }

    /// Update the given name
    pub fn set_name(&mut self, name: Option<String>) -> Option<UserField> {
        if self.name == name {
            return None;
        }
        self.name = name;
        self.touch();
        Some(UserField::Name)
    }

    /// Update the last name
    pub fn set_last_name(&mut self, last_name: Option<String>) -> Option<UserField> {
        if self.last_name == last_name {
            return None;
        }
        self.last_name = last_name;
        self.touch();
        Some(UserField::LastName)
    }

    /// Update the position label
    pub fn set_role(&mut self, role: Option<String>) -> Option<UserField> {
        if self.role == role {
            return None;
        }
        self.role = role;
        self.touch();
        Some(UserField::Role)
    }

    /// Flip the active flag
    pub fn set_active(&mut self, is_active: bool) -> Option<UserField> {
        if self.is_active == is_active {
            return None;
        }
        self.is_active = is_active;
        self.touch();
        Some(UserField::IsActive)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// Field values for a user that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl NewUser {
    /// Regular account with default flags
    pub fn new(username: String, email: String) -> Self {
        Self {
            username,
            email,
            name: None,
            last_name: None,
            role: None,
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }
}
