//! User history database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for user_history table
#[derive(Debug, Clone, FromRow)]
pub struct UserHistoryModel {
    pub history_id: i64,
    pub user_id: i64,
    pub change: String,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub changed_fields: Vec<String>,
    pub recorded_at: DateTime<Utc>,
}
