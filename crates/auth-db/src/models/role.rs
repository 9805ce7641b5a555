//! Role database model

use sqlx::FromRow;

/// Database model for custom_roles table
#[derive(Debug, Clone, FromRow)]
pub struct RoleModel {
    pub id: i64,
    pub name: String,
    pub description: String,
}
