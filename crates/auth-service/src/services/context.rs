//! Service context - dependency container for services
//!
//! Holds every repository behind its trait so services work the same against
//! PostgreSQL and the in-memory store.

use std::sync::Arc;

use auth_common::PasswordService;
use auth_core::traits::{
    GroupRepository, GroupRoleRepository, MembershipRepository, RoleRepository,
    UserHistoryRepository, UserRepository,
};
use auth_db::{
    MemoryStore, PgGroupRepository, PgGroupRoleRepository, PgMembershipRepository, PgPool,
    PgRoleRepository, PgUserHistoryRepository, PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone: every field is reference counted.
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    user_history_repo: Arc<dyn UserHistoryRepository>,
    role_repo: Arc<dyn RoleRepository>,
    group_repo: Arc<dyn GroupRepository>,
    group_role_repo: Arc<dyn GroupRoleRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
    password_service: Arc<PasswordService>,
}

impl ServiceContext {
    /// Create a new service context from explicit parts
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        user_history_repo: Arc<dyn UserHistoryRepository>,
        role_repo: Arc<dyn RoleRepository>,
        group_repo: Arc<dyn GroupRepository>,
        group_role_repo: Arc<dyn GroupRoleRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        password_service: Arc<PasswordService>,
    ) -> Self {
        Self {
            user_repo,
            user_history_repo,
            role_repo,
            group_repo,
            group_role_repo,
            membership_repo,
            password_service,
        }
    }

    /// Wire every repository to one PostgreSQL pool
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgUserHistoryRepository::new(pool.clone())),
            Arc::new(PgRoleRepository::new(pool.clone())),
            Arc::new(PgGroupRepository::new(pool.clone())),
            Arc::new(PgGroupRoleRepository::new(pool.clone())),
            Arc::new(PgMembershipRepository::new(pool)),
            Arc::new(PasswordService::new()),
        )
    }

    /// Wire every repository to one in-memory store
    pub fn in_memory(store: &MemoryStore) -> Self {
        Self::new(
            Arc::new(store.user_repository()),
            Arc::new(store.user_history_repository()),
            Arc::new(store.role_repository()),
            Arc::new(store.group_repository()),
            Arc::new(store.group_role_repository()),
            Arc::new(store.membership_repository()),
            Arc::new(PasswordService::new()),
        )
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the user history repository
    pub fn user_history_repo(&self) -> &dyn UserHistoryRepository {
        self.user_history_repo.as_ref()
    }

    /// Get the role repository
    pub fn role_repo(&self) -> &dyn RoleRepository {
        self.role_repo.as_ref()
    }

    /// Get the group repository
    pub fn group_repo(&self) -> &dyn GroupRepository {
        self.group_repo.as_ref()
    }

    /// Get the group-role repository
    pub fn group_role_repo(&self) -> &dyn GroupRoleRepository {
        self.group_role_repo.as_ref()
    }

    /// Get the membership repository
    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.membership_repo.as_ref()
    }

    // === Services ===

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        self.password_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("password_service", &self.password_service)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    user_history_repo: Option<Arc<dyn UserHistoryRepository>>,
    role_repo: Option<Arc<dyn RoleRepository>>,
    group_repo: Option<Arc<dyn GroupRepository>>,
    group_role_repo: Option<Arc<dyn GroupRoleRepository>>,
    membership_repo: Option<Arc<dyn MembershipRepository>>,
    password_service: Option<Arc<PasswordService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn user_history_repo(mut self, repo: Arc<dyn UserHistoryRepository>) -> Self {
        self.user_history_repo = Some(repo);
        self
    }

    pub fn role_repo(mut self, repo: Arc<dyn RoleRepository>) -> Self {
        self.role_repo = Some(repo);
        self
    }

    pub fn group_repo(mut self, repo: Arc<dyn GroupRepository>) -> Self {
        self.group_repo = Some(repo);
        self
    }

    pub fn group_role_repo(mut self, repo: Arc<dyn GroupRoleRepository>) -> Self {
        self.group_role_repo = Some(repo);
        self
    }

    pub fn membership_repo(mut self, repo: Arc<dyn MembershipRepository>) -> Self {
        self.membership_repo = Some(repo);
        self
    }

    pub fn password_service(mut self, service: Arc<PasswordService>) -> Self {
        self.password_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// The password service defaults to Argon2id when not set.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.user_history_repo
                .ok_or_else(|| ServiceError::validation("user_history_repo is required"))?,
            self.role_repo
                .ok_or_else(|| ServiceError::validation("role_repo is required"))?,
            self.group_repo
                .ok_or_else(|| ServiceError::validation("group_repo is required"))?,
            self.group_role_repo
                .ok_or_else(|| ServiceError::validation("group_role_repo is required"))?,
            self.membership_repo
                .ok_or_else(|| ServiceError::validation("membership_repo is required"))?,
            self.password_service.unwrap_or_default(),
        ))
    }
}
