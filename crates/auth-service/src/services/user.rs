//! User service
//!
//! Lookups, credential checks, profile and status changes, group membership
//! and the audit trail for existing users. Every change to a user row goes
//! through the repository's history write-through.

use chrono::Utc;
use tracing::{info, instrument, warn};
use validator::Validate;

use auth_core::entities::{Group, Role, User, UserField, UserHistoryEntry};
use auth_core::value_objects::{GroupId, UserId};
use auth_core::DomainError;

use crate::dto::UserChanges;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, user_id: UserId) -> ServiceResult<Option<User>> {
        Ok(self.ctx.user_repo().find_by_id(user_id).await?)
    }

    /// Look up by natural key
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> ServiceResult<Option<User>> {
        Ok(self.ctx.user_repo().find_by_username(username).await?)
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        Ok(self.ctx.user_repo().find_by_email(email).await?)
    }

    /// Get user entity by ID, failing when absent
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Check a plaintext password for a username
    ///
    /// Unknown users and unusable passwords both yield `false`.
    #[instrument(skip(self, password))]
    pub async fn check_password(&self, username: &str, password: &str) -> ServiceResult<bool> {
        let Some(user) = self.ctx.user_repo().find_by_username(username).await? else {
            return Ok(false);
        };

        let Some(stored) = self.ctx.user_repo().get_password_hash(user.id).await? else {
            warn!(user_id = %user.id, "User row without password hash");
            return Ok(false);
        };

        Ok(self.ctx.password_service().verify(password, &stored)?)
    }

    /// Replace the password; `None` makes it unusable
    #[instrument(skip(self, password))]
    pub async fn set_password(&self, user_id: UserId, password: Option<&str>) -> ServiceResult<()> {
        let stored = self.ctx.password_service().make(password)?;
        self.ctx
            .user_repo()
            .update_password(user_id, &stored)
            .await
            .map_err(|e| match e {
                DomainError::UserNotFound(id) => {
                    ServiceError::not_found("User", id.to_string())
                }
                other => other.into(),
            })?;

        info!(user_id = %user_id, usable = password.is_some(), "Password changed");
        Ok(())
    }

    /// Apply a profile update
    ///
    /// Returns the stored user. Nothing is written when no value differs.
    #[instrument(skip(self, changes))]
    pub async fn update_profile(&self, user_id: UserId, changes: UserChanges) -> ServiceResult<User> {
        changes.validate()?;
        let mut user = self.get_user(user_id).await?;

        let mut changed: Vec<UserField> = Vec::new();
        if let Some(email) = changes.email {
            changed.extend(user.set_email(email));
        }
        if let Some(name) = changes.name {
            changed.extend(user.set_name(name));
        }
        if let Some(last_name) = changes.last_name {
            changed.extend(user.set_last_name(last_name));
        }
        if let Some(role) = changes.role {
            changed.extend(user.set_role(role));
        }

        if changed.is_empty() {
            return Ok(user);
        }

        self.ctx.user_repo().update(&user, &changed).await?;
        info!(user_id = %user_id, fields = ?changed, "Profile updated");
        Ok(user)
    }

    /// Soft-deactivate; the row is kept
    #[instrument(skip(self))]
    pub async fn deactivate(&self, user_id: UserId) -> ServiceResult<User> {
        self.set_active(user_id, false).await
    }

    #[instrument(skip(self))]
    pub async fn activate(&self, user_id: UserId) -> ServiceResult<User> {
        self.set_active(user_id, true).await
    }

    async fn set_active(&self, user_id: UserId, is_active: bool) -> ServiceResult<User> {
        let mut user = self.get_user(user_id).await?;
        if let Some(field) = user.set_active(is_active) {
            self.ctx.user_repo().update(&user, &[field]).await?;
            info!(user_id = %user_id, is_active, "Active flag changed");
        }
        Ok(user)
    }

    /// Stamp the current time as last login
    #[instrument(skip(self))]
    pub async fn record_login(&self, user_id: UserId) -> ServiceResult<()> {
        self.ctx
            .user_repo()
            .record_login(user_id, Utc::now())
            .await?;
        Ok(())
    }

    /// Add the user to a group; returns false if already a member
    #[instrument(skip(self))]
    pub async fn add_to_group(&self, user_id: UserId, group_id: GroupId) -> ServiceResult<bool> {
        let added = self.ctx.membership_repo().add(user_id, group_id).await?;
        if added {
            info!(user_id = %user_id, group_id = %group_id, "User added to group");
        }
        Ok(added)
    }

    /// Remove the user from a group; returns false if not a member
    #[instrument(skip(self))]
    pub async fn remove_from_group(&self, user_id: UserId, group_id: GroupId) -> ServiceResult<bool> {
        Ok(self.ctx.membership_repo().remove(user_id, group_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn groups_of(&self, user_id: UserId) -> ServiceResult<Vec<Group>> {
        Ok(self.ctx.membership_repo().groups_of(user_id).await?)
    }

    /// Roles reachable through the user's groups
    #[instrument(skip(self))]
    pub async fn roles_of(&self, user_id: UserId) -> ServiceResult<Vec<Role>> {
        Ok(self.ctx.role_repo().find_by_user(user_id).await?)
    }

    /// Audit trail, oldest first
    #[instrument(skip(self))]
    pub async fn history(&self, user_id: UserId) -> ServiceResult<Vec<UserHistoryEntry>> {
        Ok(self.ctx.user_history_repo().find_by_user(user_id).await?)
    }
}
