//! Role service
//!
//! Handles the role registry: creation, get-or-create by unique name,
//! description edits and deletion (which drops the role's group associations).

use tracing::{info, instrument};
use validator::ValidateLength;

use auth_core::entities::Role;
use auth_core::value_objects::RoleId;
use auth_core::DomainError;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Longest accepted role name
pub const MAX_ROLE_NAME_LENGTH: u64 = 255;

/// Role service
pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    /// Create a new RoleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new role; fails if the name is taken
    #[instrument(skip(self, description))]
    pub async fn create_role(&self, name: &str, description: &str) -> ServiceResult<Role> {
        validate_role_name(name)?;
        let role = self.ctx.role_repo().create(name, description).await?;
        info!(role_id = %role.id, name = %role.name, "Role created");
        Ok(role)
    }

    /// Fetch by name or create with the given description
    ///
    /// The flag is true when the role was created by this call.
    #[instrument(skip(self, description))]
    pub async fn get_or_create_role(
        &self,
        name: &str,
        description: &str,
    ) -> ServiceResult<(Role, bool)> {
        validate_role_name(name)?;
        let (role, created) = self.ctx.role_repo().get_or_create(name, description).await?;
        if created {
            info!(role_id = %role.id, name = %role.name, "Role created");
        }
        Ok((role, created))
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> ServiceResult<Option<Role>> {
        Ok(self.ctx.role_repo().find_by_name(name).await?)
    }

    /// Get role by ID, failing when absent
    #[instrument(skip(self))]
    pub async fn get_role(&self, role_id: RoleId) -> ServiceResult<Role> {
        self.ctx
            .role_repo()
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Role", role_id.to_string()))
    }

    /// All roles ordered by name
    #[instrument(skip(self))]
    pub async fn list_roles(&self) -> ServiceResult<Vec<Role>> {
        Ok(self.ctx.role_repo().find_all().await?)
    }

    #[instrument(skip(self, description))]
    pub async fn update_description(&self, role_id: RoleId, description: &str) -> ServiceResult<Role> {
        self.ctx
            .role_repo()
            .update_description(role_id, description)
            .await
            .map_err(not_found_as_service)?;
        self.get_role(role_id).await
    }

    /// Delete a role and every association that references it
    #[instrument(skip(self))]
    pub async fn delete_role(&self, role_id: RoleId) -> ServiceResult<()> {
        self.ctx
            .role_repo()
            .delete(role_id)
            .await
            .map_err(not_found_as_service)?;
        info!(role_id = %role_id, "Role deleted");
        Ok(())
    }
}

fn validate_role_name(name: &str) -> ServiceResult<()> {
    if name.validate_length(Some(1), Some(MAX_ROLE_NAME_LENGTH), None) {
        Ok(())
    } else {
        Err(ServiceError::validation(format!(
            "Role name must be 1-{MAX_ROLE_NAME_LENGTH} characters"
        )))
    }
}

fn not_found_as_service(err: DomainError) -> ServiceError {
    match err {
        DomainError::RoleNotFound(id) => ServiceError::not_found("Role", id.to_string()),
        other => other.into(),
    }
}
