//! PostgreSQL implementation of GroupRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use auth_core::entities::Group;
use auth_core::error::DomainError;
use auth_core::traits::{GroupRepository, RepoResult};
use auth_core::value_objects::GroupId;

use crate::models::GroupModel;

use super::error::{group_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of GroupRepository
#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    /// Create a new PgGroupRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: GroupId) -> RepoResult<Option<Group>> {
        let result =
            sqlx::query_as::<_, GroupModel>("SELECT id, name FROM auth_groups WHERE id = $1")
                .bind(id.into_inner())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Group>> {
        let result =
            sqlx::query_as::<_, GroupModel>("SELECT id, name FROM auth_groups WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Group>> {
        let results =
            sqlx::query_as::<_, GroupModel>("SELECT id, name FROM auth_groups ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(results.into_iter().map(Group::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> RepoResult<Group> {
        let model = sqlx::query_as::<_, GroupModel>(
            "INSERT INTO auth_groups (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::duplicate("Group", "name", name)))?;

        Ok(Group::from(model))
    }

    #[instrument(skip(self))]
    async fn get_or_create(&self, name: &str) -> RepoResult<(Group, bool)> {
        let inserted = sqlx::query_as::<_, GroupModel>(
            r"
            INSERT INTO auth_groups (name)
            VALUES ($1)
            ON CONFLICT ON CONSTRAINT auth_groups_name_key DO NOTHING
            RETURNING id, name
            ",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = inserted {
            debug!(group_id = model.id, "Group inserted");
            return Ok((Group::from(model), true));
        }

        let existing = self.find_by_name(name).await?.ok_or_else(|| {
            DomainError::DatabaseError(format!("group '{name}' disappeared during get_or_create"))
        })?;
        Ok((existing, false))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: GroupId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM auth_groups WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(group_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM auth_groups")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
