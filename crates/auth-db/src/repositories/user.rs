//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, instrument};

use auth_core::entities::{HistoryChange, NewUser, User, UserField};
use auth_core::error::DomainError;
use auth_core::traits::{RepoResult, UserRepository};
use auth_core::value_objects::UserId;

use crate::mappers::changed_field_names;
use crate::models::UserModel;
use crate::schema::{USERS_EMAIL_KEY, USERS_USERNAME_KEY};

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of UserRepository
///
/// Every row change and its history entry share one transaction.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_conflict(constraint: Option<&str>, username: &str, email: &str) -> DomainError {
    match constraint {
        Some(USERS_USERNAME_KEY) => DomainError::duplicate("User", "username", username),
        Some(USERS_EMAIL_KEY) => DomainError::duplicate("User", "email", email),
        other => DomainError::DatabaseError(format!(
            "unexpected unique violation on users: {}",
            other.unwrap_or("<unnamed>")
        )),
    }
}

async fn insert_history(
    conn: &mut PgConnection,
    user: &User,
    change: HistoryChange,
    changed: &[UserField],
) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO user_history (user_id, change, username, email, name, last_name, role,
                                  is_active, is_staff, is_superuser, last_login, changed_fields,
                                  recorded_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        ",
    )
    .bind(user.id.into_inner())
    .bind(change.as_str())
    .bind(&user.username)
    .bind(&user.email)
    .bind(user.name.as_deref())
    .bind(user.last_name.as_deref())
    .bind(user.role.as_deref())
    .bind(user.is_active)
    .bind(user.is_staff)
    .bind(user.is_superuser)
    .bind(user.last_login)
    .bind(changed_field_names(changed))
    .bind(Utc::now())
    .execute(conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, name, last_name, role, password_hash,
                   is_active, is_staff, is_superuser, last_login, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, name, last_name, role, password_hash,
                   is_active, is_staff, is_superuser, last_login, created_at, updated_at
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, name, last_name, role, password_hash,
                   is_active, is_staff, is_superuser, last_login, created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, user, password_hash), fields(username = %user.username))]
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let now = Utc::now();

        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (username, email, name, last_name, role, password_hash,
                               is_active, is_staff, is_superuser, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING id, username, email, name, last_name, role, password_hash,
                      is_active, is_staff, is_superuser, last_login, created_at, updated_at
            ",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.name.as_deref())
        .bind(user.last_name.as_deref())
        .bind(user.role.as_deref())
        .bind(password_hash)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| {
                user_conflict(constraint, &user.username, &user.email)
            })
        })?;

        let created = User::from(model);
        insert_history(&mut tx, &created, HistoryChange::Created, &[]).await?;
        tx.commit().await.map_err(map_db_error)?;

        debug!(user_id = %created.id, "User inserted");
        Ok(created)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User, changed: &[UserField]) -> RepoResult<()> {
        if changed.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE users
            SET username = $2, email = $3, name = $4, last_name = $5, role = $6,
                is_active = $7, is_staff = $8, is_superuser = $9, updated_at = $10
            WHERE id = $1
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.name.as_deref())
        .bind(user.last_name.as_deref())
        .bind(user.role.as_deref())
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| {
                user_conflict(constraint, &user.username, &user.email)
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        insert_history(&mut tx, user, HistoryChange::Updated, changed).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, name, last_name, role, password_hash,
                      is_active, is_staff, is_superuser, last_login, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(password_hash)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| user_not_found(id))?;

        let user = User::from(model);
        insert_history(&mut tx, &user, HistoryChange::Updated, &[UserField::Password]).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET last_login = $2
            WHERE id = $1
            RETURNING id, username, email, name, last_name, role, password_hash,
                      is_active, is_staff, is_superuser, last_login, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| user_not_found(id))?;

        let user = User::from(model);
        insert_history(&mut tx, &user, HistoryChange::Updated, &[UserField::LastLogin]).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
