//! PostgreSQL implementation of MembershipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use auth_core::entities::Group;
use auth_core::traits::{MembershipRepository, RepoResult};
use auth_core::value_objects::{GroupId, UserId};

use crate::models::GroupModel;
use crate::schema::USER_GROUPS_USER_FKEY;

use super::error::{group_not_found, map_db_error, map_foreign_key_violation, user_not_found};

/// PostgreSQL implementation of MembershipRepository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    /// Create a new PgMembershipRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[instrument(skip(self))]
    async fn add(&self, user_id: UserId, group_id: GroupId) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO user_groups (user_id, group_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, group_id) DO NOTHING
            ",
        )
        .bind(user_id.into_inner())
        .bind(group_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |constraint| match constraint {
                Some(USER_GROUPS_USER_FKEY) => user_not_found(user_id),
                _ => group_not_found(group_id),
            })
        })?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn remove(&self, user_id: UserId, group_id: GroupId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM user_groups WHERE user_id = $1 AND group_id = $2")
            .bind(user_id.into_inner())
            .bind(group_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn is_member(&self, user_id: UserId, group_id: GroupId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM user_groups WHERE user_id = $1 AND group_id = $2)",
        )
        .bind(user_id.into_inner())
        .bind(group_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn groups_of(&self, user_id: UserId) -> RepoResult<Vec<Group>> {
        let results = sqlx::query_as::<_, GroupModel>(
            r"
            SELECT g.id, g.name
            FROM auth_groups g
            INNER JOIN user_groups ug ON ug.group_id = g.id
            WHERE ug.user_id = $1
            ORDER BY g.name
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Group::from).collect())
    }

    #[instrument(skip(self))]
    async fn members_of(&self, group_id: GroupId) -> RepoResult<Vec<UserId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM user_groups WHERE group_id = $1 ORDER BY user_id",
        )
        .bind(group_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(UserId::new).collect())
    }
}
