//! In-memory RoleRepository and GroupRoleRepository

use std::collections::BTreeSet;

use async_trait::async_trait;

use auth_core::entities::{GroupRole, Role};
use auth_core::error::DomainError;
use auth_core::traits::{GroupRoleRepository, RepoResult, RoleRepository};
use auth_core::value_objects::{GroupId, GroupRoleId, RoleId, UserId};

use super::{MemoryState, SharedState};

impl MemoryState {
    fn role_named(&self, name: &str) -> Option<&Role> {
        self.roles.values().find(|r| r.name == name)
    }

    fn insert_role(&mut self, name: &str, description: &str) -> Role {
        let role = Role {
            id: RoleId::new(self.role_seq.next()),
            name: name.to_string(),
            description: description.to_string(),
        };
        self.roles.insert(role.id.into_inner(), role.clone());
        role
    }
}

fn sorted_by_name(mut roles: Vec<Role>) -> Vec<Role> {
    roles.sort_by(|a, b| a.name.cmp(&b.name));
    roles
}

/// In-memory implementation of RoleRepository
#[derive(Debug, Clone)]
pub struct MemoryRoleRepository {
    state: SharedState,
}

impl MemoryRoleRepository {
    pub(crate) fn new(state: SharedState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl RoleRepository for MemoryRoleRepository {
    async fn find_by_id(&self, id: RoleId) -> RepoResult<Option<Role>> {
        Ok(self.state.read().roles.get(&id.into_inner()).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>> {
        Ok(self.state.read().role_named(name).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<Role>> {
        let roles = self.state.read().roles.values().cloned().collect();
        Ok(sorted_by_name(roles))
    }

    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Role>> {
        let state = self.state.read();
        let groups: BTreeSet<i64> = state
            .memberships
            .iter()
            .filter(|(user, _)| *user == user_id.into_inner())
            .map(|(_, group)| *group)
            .collect();

        let role_ids: BTreeSet<i64> = state
            .group_roles
            .values()
            .filter(|gr| groups.contains(&gr.group_id.into_inner()))
            .map(|gr| gr.role_id.into_inner())
            .collect();

        let roles = role_ids
            .iter()
            .filter_map(|id| state.roles.get(id).cloned())
            .collect();
        Ok(sorted_by_name(roles))
    }

    async fn create(&self, name: &str, description: &str) -> RepoResult<Role> {
        let mut state = self.state.write();
        if state.role_named(name).is_some() {
            return Err(DomainError::duplicate("Role", "name", name));
        }
        Ok(state.insert_role(name, description))
    }

    async fn get_or_create(&self, name: &str, description: &str) -> RepoResult<(Role, bool)> {
        let mut state = self.state.write();
        if let Some(existing) = state.role_named(name) {
            return Ok((existing.clone(), false));
        }
        Ok((state.insert_role(name, description), true))
    }

    async fn update_description(&self, id: RoleId, description: &str) -> RepoResult<()> {
        let mut state = self.state.write();
        let role = state
            .roles
            .get_mut(&id.into_inner())
            .ok_or(DomainError::RoleNotFound(id))?;
        role.description = description.to_string();
        Ok(())
    }

    async fn delete(&self, id: RoleId) -> RepoResult<()> {
        let mut state = self.state.write();
        if state.roles.remove(&id.into_inner()).is_none() {
            return Err(DomainError::RoleNotFound(id));
        }
        state.group_roles.retain(|_, gr| gr.role_id != id);
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.state.read().roles.len() as i64)
    }
}

/// In-memory implementation of GroupRoleRepository
#[derive(Debug, Clone)]
pub struct MemoryGroupRoleRepository {
    state: SharedState,
}

impl MemoryGroupRoleRepository {
    pub(crate) fn new(state: SharedState) -> Self {
        Self { state }
    }

    fn matching<P>(&self, predicate: P) -> Vec<GroupRole>
    where
        P: Fn(&GroupRole) -> bool,
    {
        self.state
            .read()
            .group_roles
            .values()
            .filter(|gr| predicate(gr))
            .copied()
            .collect()
    }
}

#[async_trait]
impl GroupRoleRepository for MemoryGroupRoleRepository {
    async fn create(&self, group_id: GroupId, role_id: RoleId) -> RepoResult<GroupRole> {
        let mut state = self.state.write();
        if !state.groups.contains_key(&group_id.into_inner()) {
            return Err(DomainError::GroupNotFound(group_id));
        }
        if !state.roles.contains_key(&role_id.into_inner()) {
            return Err(DomainError::RoleNotFound(role_id));
        }

        let link = GroupRole {
            id: GroupRoleId::new(state.group_role_seq.next()),
            group_id,
            role_id,
        };
        state.group_roles.insert(link.id.into_inner(), link);
        Ok(link)
    }

    async fn exists(&self, group_id: GroupId, role_id: RoleId) -> RepoResult<bool> {
        let state = self.state.read();
        Ok(state.group_roles.values().any(|gr| gr.links(group_id, role_id)))
    }

    async fn find_by_group(&self, group_id: GroupId) -> RepoResult<Vec<GroupRole>> {
        Ok(self.matching(|gr| gr.group_id == group_id))
    }

    async fn find_by_role(&self, role_id: RoleId) -> RepoResult<Vec<GroupRole>> {
        Ok(self.matching(|gr| gr.role_id == role_id))
    }

    async fn find_all(&self) -> RepoResult<Vec<GroupRole>> {
        Ok(self.matching(|_| true))
    }

    async fn delete(&self, id: GroupRoleId) -> RepoResult<()> {
        let mut state = self.state.write();
        state
            .group_roles
            .remove(&id.into_inner())
            .map(|_| ())
            .ok_or(DomainError::GroupRoleNotFound(id))
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.state.read().group_roles.len() as i64)
    }
}
