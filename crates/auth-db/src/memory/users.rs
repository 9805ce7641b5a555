//! In-memory UserRepository and UserHistoryRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use auth_core::entities::{
    HistoryChange, NewUser, User, UserField, UserHistoryEntry, UserSnapshot,
};
use auth_core::error::DomainError;
use auth_core::traits::{RepoResult, UserHistoryRepository, UserRepository};
use auth_core::value_objects::{HistoryId, UserId};

use super::{MemoryState, SharedState, StoredUser};

impl MemoryState {
    pub(crate) fn push_history(&mut self, user: &User, change: HistoryChange, changed: &[UserField]) {
        let history_id = HistoryId::new(self.history_seq.next());
        self.history.push(UserHistoryEntry {
            history_id,
            user_id: user.id,
            change,
            snapshot: UserSnapshot::from(user),
            changed_fields: changed.to_vec(),
            recorded_at: Utc::now(),
        });
    }

    /// Reject a username or email held by a user other than `except`
    fn check_user_unique(
        &self,
        username: &str,
        email: &str,
        except: Option<UserId>,
    ) -> RepoResult<()> {
        let others = self
            .users
            .values()
            .map(|stored| &stored.user)
            .filter(|u| Some(u.id) != except);

        for other in others {
            if other.username == username {
                return Err(DomainError::duplicate("User", "username", username));
            }
            if other.email == email {
                return Err(DomainError::duplicate("User", "email", email));
            }
        }
        Ok(())
    }

    fn user_by<P>(&self, predicate: P) -> Option<User>
    where
        P: Fn(&User) -> bool,
    {
        self.users
            .values()
            .map(|stored| &stored.user)
            .find(|u| predicate(u))
            .cloned()
    }
}

/// In-memory implementation of UserRepository
#[derive(Debug, Clone)]
pub struct MemoryUserRepository {
    state: SharedState,
}

impl MemoryUserRepository {
    pub(crate) fn new(state: SharedState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let state = self.state.read();
        Ok(state.users.get(&id.into_inner()).map(|s| s.user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self.state.read().user_by(|u| u.username == username))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.state.read().user_by(|u| u.email == email))
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.state.read().users.len() as i64)
    }

    #[instrument(skip(self, user, password_hash), fields(username = %user.username))]
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut state = self.state.write();
        state.check_user_unique(&user.username, &user.email, None)?;

        let now = Utc::now();
        let created = User {
            id: UserId::new(state.user_seq.next()),
            username: user.username.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.clone(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            last_login: None,
            created_at: now,
            updated_at: now,
        };

        state.users.insert(
            created.id.into_inner(),
            StoredUser {
                user: created.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        state.push_history(&created, HistoryChange::Created, &[]);

        debug!(user_id = %created.id, "User inserted");
        Ok(created)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User, changed: &[UserField]) -> RepoResult<()> {
        if changed.is_empty() {
            return Ok(());
        }

        let mut state = self.state.write();
        if !state.users.contains_key(&user.id.into_inner()) {
            return Err(DomainError::UserNotFound(user.id));
        }
        state.check_user_unique(&user.username, &user.email, Some(user.id))?;

        let snapshot = {
            let stored = state
                .users
                .get_mut(&user.id.into_inner())
                .ok_or(DomainError::UserNotFound(user.id))?;
            let row = &mut stored.user;
            row.username.clone_from(&user.username);
            row.email.clone_from(&user.email);
            row.name.clone_from(&user.name);
            row.last_name.clone_from(&user.last_name);
            row.role.clone_from(&user.role);
            row.is_active = user.is_active;
            row.is_staff = user.is_staff;
            row.is_superuser = user.is_superuser;
            row.updated_at = user.updated_at;
            row.clone()
        };
        state.push_history(&snapshot, HistoryChange::Updated, changed);

        Ok(())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        let state = self.state.read();
        Ok(state
            .users
            .get(&id.into_inner())
            .map(|s| s.password_hash.clone()))
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.write();
        let user = {
            let stored = state
                .users
                .get_mut(&id.into_inner())
                .ok_or(DomainError::UserNotFound(id))?;
            stored.password_hash = password_hash.to_string();
            stored.user.updated_at = Utc::now();
            stored.user.clone()
        };
        state.push_history(&user, HistoryChange::Updated, &[UserField::Password]);

        Ok(())
    }

    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> RepoResult<()> {
        let mut state = self.state.write();
        let user = {
            let stored = state
                .users
                .get_mut(&id.into_inner())
                .ok_or(DomainError::UserNotFound(id))?;
            stored.user.last_login = Some(at);
            stored.user.clone()
        };
        state.push_history(&user, HistoryChange::Updated, &[UserField::LastLogin]);

        Ok(())
    }
}

/// In-memory implementation of UserHistoryRepository
#[derive(Debug, Clone)]
pub struct MemoryUserHistoryRepository {
    state: SharedState,
}

impl MemoryUserHistoryRepository {
    pub(crate) fn new(state: SharedState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl UserHistoryRepository for MemoryUserHistoryRepository {
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<UserHistoryEntry>> {
        let state = self.state.read();
        Ok(state
            .history
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_by_user(&self, user_id: UserId) -> RepoResult<i64> {
        let state = self.state.read();
        Ok(state.history.iter().filter(|e| e.user_id == user_id).count() as i64)
    }
}
