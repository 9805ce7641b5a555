//! User factory
//!
//! The only way new users enter the store: validates the input, hashes the
//! password (or stores an unusable marker) and persists one row together with
//! its `Created` history entry.

use tracing::{info, instrument};
use validator::Validate;

use auth_core::entities::{NewUser, User};

use crate::dto::CreateUserRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User factory
pub struct UserFactory<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserFactory<'a> {
    /// Create a new UserFactory
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a regular user (not staff, not superuser)
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_user(&self, request: CreateUserRequest) -> ServiceResult<User> {
        self.create(request, false).await
    }

    /// Create a user with both the staff and superuser flags set
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_superuser(&self, request: CreateUserRequest) -> ServiceResult<User> {
        self.create(request, true).await
    }

    async fn create(&self, request: CreateUserRequest, privileged: bool) -> ServiceResult<User> {
        request.validate()?;

        let password_hash = self
            .ctx
            .password_service()
            .make(request.password.as_deref())?;

        let new_user = NewUser {
            username: request.username,
            email: request.email,
            name: request.name,
            last_name: request.last_name,
            role: request.extra.role,
            is_active: request.extra.is_active.unwrap_or(true),
            is_staff: privileged,
            is_superuser: privileged,
        };

        let user = self.ctx.user_repo().create(&new_user, &password_hash).await?;

        info!(
            user_id = %user.id,
            username = %user.username,
            superuser = privileged,
            usable_password = request.password.is_some(),
            "User created"
        );
        Ok(user)
    }
}
