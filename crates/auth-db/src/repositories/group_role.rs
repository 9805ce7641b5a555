//! PostgreSQL implementation of GroupRoleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use auth_core::entities::GroupRole;
use auth_core::traits::{GroupRoleRepository, RepoResult};
use auth_core::value_objects::{GroupId, GroupRoleId, RoleId};

use crate::models::GroupRoleModel;
use crate::schema::GROUP_ROLES_ROLE_FKEY;

use super::error::{
    group_not_found, group_role_not_found, map_db_error, map_foreign_key_violation, role_not_found,
};

/// PostgreSQL implementation of GroupRoleRepository
#[derive(Clone)]
pub struct PgGroupRoleRepository {
    pool: PgPool,
}

impl PgGroupRoleRepository {
    /// Create a new PgGroupRoleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRoleRepository for PgGroupRoleRepository {
    #[instrument(skip(self))]
    async fn create(&self, group_id: GroupId, role_id: RoleId) -> RepoResult<GroupRole> {
        let model = sqlx::query_as::<_, GroupRoleModel>(
            r"
            INSERT INTO group_roles (group_id, role_id)
            VALUES ($1, $2)
            RETURNING id, group_id, role_id
            ",
        )
        .bind(group_id.into_inner())
        .bind(role_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |constraint| match constraint {
                Some(GROUP_ROLES_ROLE_FKEY) => role_not_found(role_id),
                _ => group_not_found(group_id),
            })
        })?;

        Ok(GroupRole::from(model))
    }

    #[instrument(skip(self))]
    async fn exists(&self, group_id: GroupId, role_id: RoleId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM group_roles WHERE group_id = $1 AND role_id = $2)",
        )
        .bind(group_id.into_inner())
        .bind(role_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_group(&self, group_id: GroupId) -> RepoResult<Vec<GroupRole>> {
        let results = sqlx::query_as::<_, GroupRoleModel>(
            "SELECT id, group_id, role_id FROM group_roles WHERE group_id = $1 ORDER BY id",
        )
        .bind(group_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(GroupRole::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_role(&self, role_id: RoleId) -> RepoResult<Vec<GroupRole>> {
        let results = sqlx::query_as::<_, GroupRoleModel>(
            "SELECT id, group_id, role_id FROM group_roles WHERE role_id = $1 ORDER BY id",
        )
        .bind(role_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(GroupRole::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<GroupRole>> {
        let results = sqlx::query_as::<_, GroupRoleModel>(
            "SELECT id, group_id, role_id FROM group_roles ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(GroupRole::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: GroupRoleId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM group_roles WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(group_role_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM group_roles")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
