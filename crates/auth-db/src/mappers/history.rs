//! User history model ↔ entity mapper

use auth_core::entities::{HistoryChange, UserField, UserHistoryEntry, UserSnapshot};
use auth_core::error::DomainError;
use auth_core::value_objects::{HistoryId, UserId};

use crate::models::UserHistoryModel;

impl TryFrom<UserHistoryModel> for UserHistoryEntry {
    type Error = DomainError;

    fn try_from(model: UserHistoryModel) -> Result<Self, Self::Error> {
        let change = HistoryChange::parse(&model.change).ok_or_else(|| {
            DomainError::DatabaseError(format!(
                "history {} has unknown change '{}'",
                model.history_id, model.change
            ))
        })?;

        let changed_fields = model
            .changed_fields
            .iter()
            .map(|name| {
                UserField::parse(name).ok_or_else(|| {
                    DomainError::DatabaseError(format!(
                        "history {} has unknown field '{name}'",
                        model.history_id
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UserHistoryEntry {
            history_id: HistoryId::new(model.history_id),
            user_id: UserId::new(model.user_id),
            change,
            snapshot: UserSnapshot {
                username: model.username,
                email: model.email,
                name: model.name,
                last_name: model.last_name,
                role: model.role,
                is_active: model.is_active,
                is_staff: model.is_staff,
                is_superuser: model.is_superuser,
                last_login: model.last_login,
            },
            changed_fields,
            recorded_at: model.recorded_at,
        })
    }
}

/// Column names for the `changed_fields` array
pub fn changed_field_names(fields: &[UserField]) -> Vec<String> {
    fields.iter().map(|f| f.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(change: &str, fields: &[&str]) -> UserHistoryModel {
        UserHistoryModel {
            history_id: 7,
            user_id: 3,
            change: change.to_string(),
            username: "admin".to_string(),
            email: "admin@admin.com".to_string(),
            name: Some("Arthur".to_string()),
            last_name: Some("Negreiros".to_string()),
            role: None,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            last_login: None,
            changed_fields: fields.iter().map(ToString::to_string).collect(),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_history_row_maps_to_entry() {
        let entry = UserHistoryEntry::try_from(model("updated", &["email", "is_active"])).unwrap();
        assert_eq!(entry.history_id, HistoryId::new(7));
        assert_eq!(entry.user_id, UserId::new(3));
        assert_eq!(entry.change, HistoryChange::Updated);
        assert_eq!(entry.changed_fields, vec![UserField::Email, UserField::IsActive]);
        assert_eq!(entry.snapshot.username, "admin");
    }

    #[test]
    fn test_unknown_change_is_rejected() {
        let err = UserHistoryEntry::try_from(model("deleted", &[])).unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = UserHistoryEntry::try_from(model("updated", &["avatar"])).unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }

    #[test]
    fn test_changed_field_names_use_column_names() {
        let names = changed_field_names(&[UserField::LastName, UserField::Password]);
        assert_eq!(names, vec!["last_name".to_string(), "password".to_string()]);
    }
}
