//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every implementation must enforce the
//! unique columns (username, email, role name, group name) by returning
//! `DomainError::UniquenessViolation`, and must delete dependent
//! associations when a role or group is deleted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Group, GroupRole, NewUser, Role, User, UserField, UserHistoryEntry};
use crate::error::DomainError;
use crate::value_objects::{GroupId, GroupRoleId, RoleId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

/// User storage
///
/// `create`, `update` and `update_password` append exactly one history entry
/// in the same unit of work as the row change.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by username (natural key)
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Count all users
    async fn count(&self) -> RepoResult<i64>;

    /// Insert a new user with an already hashed password
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Persist the listed fields of an existing user
    async fn update(&self, user: &User, changed: &[UserField]) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Replace the password hash
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()>;

    /// Stamp the last successful login and append its history entry
    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// User History Repository
// ============================================================================

#[async_trait]
pub trait UserHistoryRepository: Send + Sync {
    /// All entries for a user, oldest first
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<UserHistoryEntry>>;

    /// Number of entries for a user
    async fn count_by_user(&self, user_id: UserId) -> RepoResult<i64>;
}

// ============================================================================
// Role Repository
// ============================================================================

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Find role by ID
    async fn find_by_id(&self, id: RoleId) -> RepoResult<Option<Role>>;

    /// Find role by its unique name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>>;

    /// List all roles ordered by name
    async fn find_all(&self) -> RepoResult<Vec<Role>>;

    /// Roles reachable from a user through group associations
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Role>>;

    /// Insert a new role
    async fn create(&self, name: &str, description: &str) -> RepoResult<Role>;

    /// Fetch by name or insert; the flag is true when the row was inserted.
    /// `description` is only used on insert.
    async fn get_or_create(&self, name: &str, description: &str) -> RepoResult<(Role, bool)>;

    /// Replace the description
    async fn update_description(&self, id: RoleId, description: &str) -> RepoResult<()>;

    /// Delete a role and its group associations
    async fn delete(&self, id: RoleId) -> RepoResult<()>;

    /// Count all roles
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Group Repository
// ============================================================================

#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find group by ID
    async fn find_by_id(&self, id: GroupId) -> RepoResult<Option<Group>>;

    /// Find group by its unique name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Group>>;

    /// List all groups ordered by name
    async fn find_all(&self) -> RepoResult<Vec<Group>>;

    /// Insert a new group
    async fn create(&self, name: &str) -> RepoResult<Group>;

    /// Fetch by name or insert; the flag is true when the row was inserted
    async fn get_or_create(&self, name: &str) -> RepoResult<(Group, bool)>;

    /// Delete a group, its role associations and its memberships
    async fn delete(&self, id: GroupId) -> RepoResult<()>;

    /// Count all groups
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Group-Role Repository
// ============================================================================

#[async_trait]
pub trait GroupRoleRepository: Send + Sync {
    /// Insert an association; duplicates of the same pair are allowed
    async fn create(&self, group_id: GroupId, role_id: RoleId) -> RepoResult<GroupRole>;

    /// Check whether at least one association joins the pair
    async fn exists(&self, group_id: GroupId, role_id: RoleId) -> RepoResult<bool>;

    /// Associations of a group
    async fn find_by_group(&self, group_id: GroupId) -> RepoResult<Vec<GroupRole>>;

    /// Associations of a role
    async fn find_by_role(&self, role_id: RoleId) -> RepoResult<Vec<GroupRole>>;

    /// All associations ordered by id
    async fn find_all(&self) -> RepoResult<Vec<GroupRole>>;

    /// Delete one association
    async fn delete(&self, id: GroupRoleId) -> RepoResult<()>;

    /// Count all associations
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Add a user to a group; returns false if already a member
    async fn add(&self, user_id: UserId, group_id: GroupId) -> RepoResult<bool>;

    /// Remove a user from a group; returns false if not a member
    async fn remove(&self, user_id: UserId, group_id: GroupId) -> RepoResult<bool>;

    /// Check membership
    async fn is_member(&self, user_id: UserId, group_id: GroupId) -> RepoResult<bool>;

    /// Groups a user belongs to, ordered by name
    async fn groups_of(&self, user_id: UserId) -> RepoResult<Vec<Group>>;

    /// Members of a group, ordered by id
    async fn members_of(&self, group_id: GroupId) -> RepoResult<Vec<UserId>>;
}
