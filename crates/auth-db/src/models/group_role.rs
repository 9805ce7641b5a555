//! Group-role association database model

use sqlx::FromRow;

/// Database model for group_roles table
#[derive(Debug, Clone, Copy, FromRow)]
pub struct GroupRoleModel {
    pub id: i64,
    pub group_id: i64,
    pub role_id: i64,
}
