//! PostgreSQL implementation of UserHistoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use auth_core::entities::UserHistoryEntry;
use auth_core::traits::{RepoResult, UserHistoryRepository};
use auth_core::value_objects::UserId;

use crate::models::UserHistoryModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserHistoryRepository
///
/// Read-only: entries are written by `PgUserRepository` inside the
/// transaction that changes the user row.
#[derive(Clone)]
pub struct PgUserHistoryRepository {
    pool: PgPool,
}

impl PgUserHistoryRepository {
    /// Create a new PgUserHistoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserHistoryRepository for PgUserHistoryRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<UserHistoryEntry>> {
        let results = sqlx::query_as::<_, UserHistoryModel>(
            r"
            SELECT history_id, user_id, change, username, email, name, last_name, role,
                   is_active, is_staff, is_superuser, last_login, changed_fields, recorded_at
            FROM user_history
            WHERE user_id = $1
            ORDER BY history_id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(UserHistoryEntry::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_by_user(&self, user_id: UserId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_history WHERE user_id = $1")
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
