//! In-memory GroupRepository and MembershipRepository

use async_trait::async_trait;

use auth_core::entities::Group;
use auth_core::error::DomainError;
use auth_core::traits::{GroupRepository, MembershipRepository, RepoResult};
use auth_core::value_objects::{GroupId, UserId};

use super::{MemoryState, SharedState};

impl MemoryState {
    fn group_named(&self, name: &str) -> Option<&Group> {
        self.groups.values().find(|g| g.name == name)
    }

    fn insert_group(&mut self, name: &str) -> Group {
        let group = Group {
            id: GroupId::new(self.group_seq.next()),
            name: name.to_string(),
        };
        self.groups.insert(group.id.into_inner(), group.clone());
        group
    }
}

/// In-memory implementation of GroupRepository
#[derive(Debug, Clone)]
pub struct MemoryGroupRepository {
    state: SharedState,
}

impl MemoryGroupRepository {
    pub(crate) fn new(state: SharedState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl GroupRepository for MemoryGroupRepository {
    async fn find_by_id(&self, id: GroupId) -> RepoResult<Option<Group>> {
        Ok(self.state.read().groups.get(&id.into_inner()).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Group>> {
        Ok(self.state.read().group_named(name).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<Group>> {
        let mut groups: Vec<Group> = self.state.read().groups.values().cloned().collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    async fn create(&self, name: &str) -> RepoResult<Group> {
        let mut state = self.state.write();
        if state.group_named(name).is_some() {
            return Err(DomainError::duplicate("Group", "name", name));
        }
        Ok(state.insert_group(name))
    }

    async fn get_or_create(&self, name: &str) -> RepoResult<(Group, bool)> {
        let mut state = self.state.write();
        if let Some(existing) = state.group_named(name) {
            return Ok((existing.clone(), false));
        }
        Ok((state.insert_group(name), true))
    }

    async fn delete(&self, id: GroupId) -> RepoResult<()> {
        let mut state = self.state.write();
        if state.groups.remove(&id.into_inner()).is_none() {
            return Err(DomainError::GroupNotFound(id));
        }
        state.group_roles.retain(|_, gr| gr.group_id != id);
        state.memberships.retain(|(_, group)| *group != id.into_inner());
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.state.read().groups.len() as i64)
    }
}

/// In-memory implementation of MembershipRepository
#[derive(Debug, Clone)]
pub struct MemoryMembershipRepository {
    state: SharedState,
}

impl MemoryMembershipRepository {
    pub(crate) fn new(state: SharedState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl MembershipRepository for MemoryMembershipRepository {
    async fn add(&self, user_id: UserId, group_id: GroupId) -> RepoResult<bool> {
        let mut state = self.state.write();
        if !state.users.contains_key(&user_id.into_inner()) {
            return Err(DomainError::UserNotFound(user_id));
        }
        if !state.groups.contains_key(&group_id.into_inner()) {
            return Err(DomainError::GroupNotFound(group_id));
        }
        Ok(state
            .memberships
            .insert((user_id.into_inner(), group_id.into_inner())))
    }

    async fn remove(&self, user_id: UserId, group_id: GroupId) -> RepoResult<bool> {
        let mut state = self.state.write();
        Ok(state
            .memberships
            .remove(&(user_id.into_inner(), group_id.into_inner())))
    }

    async fn is_member(&self, user_id: UserId, group_id: GroupId) -> RepoResult<bool> {
        let state = self.state.read();
        Ok(state
            .memberships
            .contains(&(user_id.into_inner(), group_id.into_inner())))
    }

    async fn groups_of(&self, user_id: UserId) -> RepoResult<Vec<Group>> {
        let state = self.state.read();
        let mut groups: Vec<Group> = state
            .memberships
            .iter()
            .filter(|(user, _)| *user == user_id.into_inner())
            .filter_map(|(_, group)| state.groups.get(group).cloned())
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    async fn members_of(&self, group_id: GroupId) -> RepoResult<Vec<UserId>> {
        let state = self.state.read();
        // Tuples sort by user id first, so the result is already ordered.
        Ok(state
            .memberships
            .iter()
            .filter(|(_, group)| *group == group_id.into_inner())
            .map(|(user, _)| UserId::new(*user))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth_core::entities::NewUser;
    use auth_core::traits::{GroupRoleRepository, RoleRepository, UserRepository};

    use crate::memory::MemoryStore;

    async fn seeded_user(store: &MemoryStore, username: &str) -> UserId {
        store
            .user_repository()
            .create(
                &NewUser::new(username.to_string(), format!("{username}@example.com")),
                "hash",
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_get_or_create_group() {
        let store = MemoryStore::new();
        let groups = store.group_repository();

        let (first, created) = groups.get_or_create("admin_group").await.unwrap();
        assert!(created);
        let (again, created) = groups.get_or_create("admin_group").await.unwrap();
        assert!(!created);
        assert_eq!(first, again);

        let err = groups.create("admin_group").await.unwrap_err();
        assert!(err.is_duplicate_of("Group", "name"));
    }

    #[tokio::test]
    async fn test_membership_is_a_set() {
        let store = MemoryStore::new();
        let user = seeded_user(&store, "admin").await;
        let (group, _) = store.group_repository().get_or_create("admin_group").await.unwrap();
        let members = store.membership_repository();

        assert!(members.add(user, group.id).await.unwrap());
        assert!(!members.add(user, group.id).await.unwrap());
        assert!(members.is_member(user, group.id).await.unwrap());
        assert_eq!(members.members_of(group.id).await.unwrap(), vec![user]);

        assert!(members.remove(user, group.id).await.unwrap());
        assert!(!members.remove(user, group.id).await.unwrap());
        assert!(members.groups_of(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_membership_requires_both_ends() {
        let store = MemoryStore::new();
        let user = seeded_user(&store, "admin").await;
        let members = store.membership_repository();

        let err = members.add(user, GroupId::new(5)).await.unwrap_err();
        assert!(matches!(err, DomainError::GroupNotFound(_)));
        let err = members.add(UserId::new(99), GroupId::new(5)).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_group_delete_cascades() {
        let store = MemoryStore::new();
        let user = seeded_user(&store, "admin").await;
        let groups = store.group_repository();
        let roles = store.role_repository();
        let links = store.group_role_repository();
        let members = store.membership_repository();

        let group = groups.create("admin_group").await.unwrap();
        let role = roles.create("admin", "Administrator").await.unwrap();
        links.create(group.id, role.id).await.unwrap();
        members.add(user, group.id).await.unwrap();
        assert_eq!(roles.find_by_user(user).await.unwrap(), vec![role.clone()]);

        groups.delete(group.id).await.unwrap();

        assert_eq!(links.count().await.unwrap(), 0);
        assert!(members.groups_of(user).await.unwrap().is_empty());
        assert!(roles.find_by_id(role.id).await.unwrap().is_some());
        assert!(store.user_repository().find_by_id(user).await.unwrap().is_some());
        assert!(roles.find_by_user(user).await.unwrap().is_empty());

        let err = groups.delete(group.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_groups_of_sorted_by_name() {
        let store = MemoryStore::new();
        let user = seeded_user(&store, "user").await;
        let groups = store.group_repository();
        let members = store.membership_repository();

        let b = groups.create("user_group").await.unwrap();
        let a = groups.create("admin_group").await.unwrap();
        members.add(user, b.id).await.unwrap();
        members.add(user, a.id).await.unwrap();

        let names: Vec<_> = members.groups_of(user).await.unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["admin_group", "user_group"]);
    }
}
