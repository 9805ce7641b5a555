//! PostgreSQL implementation of RoleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use auth_core::entities::Role;
use auth_core::error::DomainError;
use auth_core::traits::{RepoResult, RoleRepository};
use auth_core::value_objects::{RoleId, UserId};

use crate::models::RoleModel;

use super::error::{map_db_error, map_unique_violation, role_not_found};

/// PostgreSQL implementation of RoleRepository
#[derive(Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    /// Create a new PgRoleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RoleId) -> RepoResult<Option<Role>> {
        let result = sqlx::query_as::<_, RoleModel>(
            "SELECT id, name, description FROM custom_roles WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Role::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>> {
        let result = sqlx::query_as::<_, RoleModel>(
            "SELECT id, name, description FROM custom_roles WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Role::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Role>> {
        let results = sqlx::query_as::<_, RoleModel>(
            "SELECT id, name, description FROM custom_roles ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Role::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Role>> {
        let results = sqlx::query_as::<_, RoleModel>(
            r"
            SELECT DISTINCT r.id, r.name, r.description
            FROM custom_roles r
            INNER JOIN group_roles gr ON gr.role_id = r.id
            INNER JOIN user_groups ug ON ug.group_id = gr.group_id
            WHERE ug.user_id = $1
            ORDER BY r.name
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Role::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str, description: &str) -> RepoResult<Role> {
        let model = sqlx::query_as::<_, RoleModel>(
            r"
            INSERT INTO custom_roles (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            ",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::duplicate("Role", "name", name)))?;

        Ok(Role::from(model))
    }

    #[instrument(skip(self))]
    async fn get_or_create(&self, name: &str, description: &str) -> RepoResult<(Role, bool)> {
        let inserted = sqlx::query_as::<_, RoleModel>(
            r"
            INSERT INTO custom_roles (name, description)
            VALUES ($1, $2)
            ON CONFLICT ON CONSTRAINT custom_roles_name_key DO NOTHING
            RETURNING id, name, description
            ",
        )
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = inserted {
            debug!(role_id = model.id, "Role inserted");
            return Ok((Role::from(model), true));
        }

        // Lost the insert to an existing row; a concurrent delete can still
        // make it vanish before this read.
        let existing = self.find_by_name(name).await?.ok_or_else(|| {
            DomainError::DatabaseError(format!("role '{name}' disappeared during get_or_create"))
        })?;
        Ok((existing, false))
    }

    #[instrument(skip(self))]
    async fn update_description(&self, id: RoleId, description: &str) -> RepoResult<()> {
        let result = sqlx::query("UPDATE custom_roles SET description = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(description)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(role_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RoleId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM custom_roles WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(role_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM custom_roles")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
