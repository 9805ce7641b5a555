//! User audit history
//!
//! One immutable entry is appended for every mutation of a user. Entries
//! carry a snapshot of the non-secret fields as they were *after* the change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{HistoryId, UserId};

use super::User;

/// Kind of mutation recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryChange {
    Created,
    Updated,
}

impl HistoryChange {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }

    /// Parse from storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            _ => None,
        }
    }
}

/// User fields that can appear in a history entry's change list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    Username,
    Email,
    Name,
    LastName,
    Role,
    IsActive,
    IsStaff,
    IsSuperuser,
    Password,
    LastLogin,
}

impl UserField {
    /// Column name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Name => "name",
            Self::LastName => "last_name",
            Self::Role => "role",
            Self::IsActive => "is_active",
            Self::IsStaff => "is_staff",
            Self::IsSuperuser => "is_superuser",
            Self::Password => "password",
            Self::LastLogin => "last_login",
        }
    }

    /// Parse from column name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "username" => Some(Self::Username),
            "email" => Some(Self::Email),
            "name" => Some(Self::Name),
            "last_name" => Some(Self::LastName),
            "role" => Some(Self::Role),
            "is_active" => Some(Self::IsActive),
            "is_staff" => Some(Self::IsStaff),
            "is_superuser" => Some(Self::IsSuperuser),
            "password" => Some(Self::Password),
            "last_login" => Some(Self::LastLogin),
            _ => None,
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Copy of a user's non-secret fields at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&User> for UserSnapshot {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.clone(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            last_login: user.last_login,
        }
    }
}

/// One entry of the append-only user history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHistoryEntry {
    pub history_id: HistoryId,
    pub user_id: UserId,
    pub change: HistoryChange,
    pub snapshot: UserSnapshot,
    pub changed_fields: Vec<UserField>,
    pub recorded_at: DateTime<Utc>,
}

impl UserHistoryEntry {
    /// Check whether a field is listed as changed
    pub fn touched(&self, field: UserField) -> bool {
        self.changed_fields.contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_FIELDS: [UserField; 10] = [
        UserField::Username,
        UserField::Email,
        UserField::Name,
        UserField::LastName,
        UserField::Role,
        UserField::IsActive,
        UserField::IsStaff,
        UserField::IsSuperuser,
        UserField::Password,
        UserField::LastLogin,
    ];

    #[test]
    fn test_field_names_parse_back() {
        for field in ALL_FIELDS {
            assert_eq!(UserField::parse(field.as_str()), Some(field));
        }
        assert_eq!(UserField::parse("password_hash"), None);
    }

    #[test]
    fn test_change_kind_parse() {
        assert_eq!(HistoryChange::parse("created"), Some(HistoryChange::Created));
        assert_eq!(HistoryChange::parse("updated"), Some(HistoryChange::Updated));
        assert_eq!(HistoryChange::parse("deleted"), None);
    }

    #[test]
    fn test_field_serde_uses_column_names() {
        let json = serde_json::to_string(&UserField::LastName).unwrap();
        assert_eq!(json, "\"last_name\"");
    }
}
