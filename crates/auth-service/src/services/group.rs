//! Group service
//!
//! Handles groups and their role associations.

use tracing::{info, instrument};
use validator::ValidateLength;

use auth_core::entities::{Group, GroupRole, Role};
use auth_core::value_objects::{GroupId, GroupRoleId, RoleId, UserId};
use auth_core::DomainError;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Longest accepted group name
pub const MAX_GROUP_NAME_LENGTH: u64 = 150;

/// Group service
pub struct GroupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GroupService<'a> {
    /// Create a new GroupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new group; fails if the name is taken
    #[instrument(skip(self))]
    pub async fn create_group(&self, name: &str) -> ServiceResult<Group> {
        validate_group_name(name)?;
        let group = self.ctx.group_repo().create(name).await?;
        info!(group_id = %group.id, name = %group.name, "Group created");
        Ok(group)
    }

    /// Fetch by name or create; the flag is true when created by this call
    #[instrument(skip(self))]
    pub async fn get_or_create_group(&self, name: &str) -> ServiceResult<(Group, bool)> {
        validate_group_name(name)?;
        let (group, created) = self.ctx.group_repo().get_or_create(name).await?;
        if created {
            info!(group_id = %group.id, name = %group.name, "Group created");
        }
        Ok((group, created))
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> ServiceResult<Option<Group>> {
        Ok(self.ctx.group_repo().find_by_name(name).await?)
    }

    /// Get group by ID, failing when absent
    #[instrument(skip(self))]
    pub async fn get_group(&self, group_id: GroupId) -> ServiceResult<Group> {
        self.ctx
            .group_repo()
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Group", group_id.to_string()))
    }

    /// All groups ordered by name
    #[instrument(skip(self))]
    pub async fn list_groups(&self) -> ServiceResult<Vec<Group>> {
        Ok(self.ctx.group_repo().find_all().await?)
    }

    /// Delete a group with its role associations and memberships
    #[instrument(skip(self))]
    pub async fn delete_group(&self, group_id: GroupId) -> ServiceResult<()> {
        self.ctx
            .group_repo()
            .delete(group_id)
            .await
            .map_err(not_found_as_service)?;
        info!(group_id = %group_id, "Group deleted");
        Ok(())
    }

    /// Insert an association, even if the pair is already linked
    #[instrument(skip(self))]
    pub async fn assign_role(&self, group_id: GroupId, role_id: RoleId) -> ServiceResult<GroupRole> {
        let link = self
            .ctx
            .group_role_repo()
            .create(group_id, role_id)
            .await
            .map_err(not_found_as_service)?;
        info!(group_role_id = %link.id, group_id = %group_id, role_id = %role_id, "Role assigned");
        Ok(link)
    }

    /// Insert an association only when the pair is not linked yet
    ///
    /// Returns the new association, or `None` if one already existed.
    #[instrument(skip(self))]
    pub async fn ensure_role(
        &self,
        group_id: GroupId,
        role_id: RoleId,
    ) -> ServiceResult<Option<GroupRole>> {
        if self.ctx.group_role_repo().exists(group_id, role_id).await? {
            return Ok(None);
        }
        self.assign_role(group_id, role_id).await.map(Some)
    }

    /// Remove one association
    #[instrument(skip(self))]
    pub async fn unassign(&self, group_role_id: GroupRoleId) -> ServiceResult<()> {
        self.ctx
            .group_role_repo()
            .delete(group_role_id)
            .await
            .map_err(not_found_as_service)?;
        Ok(())
    }

    /// Distinct roles linked to a group, ordered by name
    #[instrument(skip(self))]
    pub async fn roles_of_group(&self, group_id: GroupId) -> ServiceResult<Vec<Role>> {
        let links = self.ctx.group_role_repo().find_by_group(group_id).await?;

        let mut roles: Vec<Role> = Vec::with_capacity(links.len());
        for link in links {
            if roles.iter().any(|r| r.id == link.role_id) {
                continue;
            }
            if let Some(role) = self.ctx.role_repo().find_by_id(link.role_id).await? {
                roles.push(role);
            }
        }
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    /// All associations, ordered by id
    #[instrument(skip(self))]
    pub async fn associations(&self) -> ServiceResult<Vec<GroupRole>> {
        Ok(self.ctx.group_role_repo().find_all().await?)
    }

    /// Display form of an association: `"{group} - {role}"`
    #[instrument(skip(self))]
    pub async fn describe(&self, link: &GroupRole) -> ServiceResult<String> {
        let group = self.get_group(link.group_id).await?;
        let role = self
            .ctx
            .role_repo()
            .find_by_id(link.role_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Role", link.role_id.to_string()))?;
        Ok(GroupRole::label(&group, &role))
    }

    /// Members of a group, ordered by id
    #[instrument(skip(self))]
    pub async fn members_of(&self, group_id: GroupId) -> ServiceResult<Vec<UserId>> {
        Ok(self.ctx.membership_repo().members_of(group_id).await?)
    }
}

fn validate_group_name(name: &str) -> ServiceResult<()> {
    if name.validate_length(Some(1), Some(MAX_GROUP_NAME_LENGTH), None) {
        Ok(())
    } else {
        Err(ServiceError::validation(format!(
            "Group name must be 1-{MAX_GROUP_NAME_LENGTH} characters"
        )))
    }
}

fn not_found_as_service(err: DomainError) -> ServiceError {
    match err {
        DomainError::GroupNotFound(id) => ServiceError::not_found("Group", id.to_string()),
        DomainError::RoleNotFound(id) => ServiceError::not_found("Role", id.to_string()),
        DomainError::GroupRoleNotFound(id) => ServiceError::not_found("GroupRole", id.to_string()),
        other => other.into(),
    }
}
