//! Group database model

use sqlx::FromRow;

/// Database model for auth_groups table
#[derive(Debug, Clone, FromRow)]
pub struct GroupModel {
    pub id: i64,
    pub name: String,
}
