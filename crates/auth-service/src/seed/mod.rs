//! Seed routine
//!
//! One-shot bootstrap of the default roles, groups, group-role links and the
//! two starter accounts. It only runs when an operator calls
//! [`SeedRoutine::run`]; nothing is seeded as a side effect of building a
//! context.
//!
//! Roles and groups are fetched or created by unique name, so they are never
//! duplicated. Users are always created, so a second run stops with a
//! uniqueness violation on `admin`. Completed steps are not rolled back.

mod report;

use tracing::{info, instrument, warn};

use auth_common::{AssociationPolicy, SeedConfig};
use auth_core::entities::{Group, Role, User};

use crate::dto::CreateUserRequest;
use crate::services::{
    GroupService, RoleService, ServiceContext, ServiceError, ServiceResult, UserFactory, UserService,
};

pub use report::{SeedFailure, SeedReport, SeedStage};

/// A default role and the group that carries it
#[derive(Debug, Clone, Copy)]
pub struct RoleGroupDefault {
    pub role: &'static str,
    pub description: &'static str,
    pub group: &'static str,
}

/// A starter account and the group it joins
#[derive(Debug, Clone, Copy)]
pub struct AccountDefault {
    pub username: &'static str,
    pub email: &'static str,
    pub name: &'static str,
    pub last_name: &'static str,
    pub group: &'static str,
}

/// Roles and groups created by the routine, in creation order
pub const ROLE_GROUPS: [RoleGroupDefault; 2] = [
    RoleGroupDefault {
        role: "admin",
        description: "Administrator",
        group: "admin_group",
    },
    RoleGroupDefault {
        role: "user",
        description: "Regular User",
        group: "user_group",
    },
];

/// Accounts created by the routine, in creation order
pub const ACCOUNTS: [AccountDefault; 2] = [
    AccountDefault {
        username: "admin",
        email: "admin@admin.com",
        name: "Arthur",
        last_name: "Negreiros",
        group: "admin_group",
    },
    AccountDefault {
        username: "user",
        email: "user@user.com",
        name: "Regular",
        last_name: "User",
        group: "user_group",
    },
];

/// Knobs for one run
#[derive(Clone, Default)]
pub struct SeedOptions {
    pub association_policy: AssociationPolicy,
    /// Password for `admin`; unusable when `None`
    pub admin_password: Option<String>,
    /// Password for `user`; unusable when `None`
    pub user_password: Option<String>,
}

impl SeedOptions {
    fn password_for(&self, username: &str) -> Option<String> {
        match username {
            "admin" => self.admin_password.clone(),
            "user" => self.user_password.clone(),
            _ => None,
        }
    }
}

impl From<&SeedConfig> for SeedOptions {
    fn from(config: &SeedConfig) -> Self {
        Self {
            association_policy: config.association_policy,
            admin_password: config.admin_password.clone(),
            user_password: config.user_password.clone(),
        }
    }
}

impl std::fmt::Debug for SeedOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedOptions")
            .field("association_policy", &self.association_policy)
            .field("admin_password", &self.admin_password.is_some())
            .field("user_password", &self.user_password.is_some())
            .finish()
    }
}

struct Resolved<T> {
    record: T,
    created: bool,
}

/// Explicit seeding procedure
pub struct SeedRoutine<'a> {
    ctx: &'a ServiceContext,
    options: SeedOptions,
}

impl<'a> SeedRoutine<'a> {
    pub fn new(ctx: &'a ServiceContext, options: SeedOptions) -> Self {
        Self { ctx, options }
    }

    /// Run every step once, stopping at the first error
    #[instrument(skip(self), fields(policy = ?self.options.association_policy))]
    pub async fn run(&self) -> Result<SeedReport, SeedFailure> {
        let mut report = SeedReport::default();

        let roles = match self.seed_roles(&mut report).await {
            Ok(roles) => roles,
            Err(source) => return Err(fail(SeedStage::Roles, report, source)),
        };
        let groups = match self.seed_groups(&mut report).await {
            Ok(groups) => groups,
            Err(source) => return Err(fail(SeedStage::Groups, report, source)),
        };
        if let Err(source) = self.seed_associations(&roles, &groups, &mut report).await {
            return Err(fail(SeedStage::Associations, report, source));
        }
        let users = match self.seed_users(&mut report).await {
            Ok(users) => users,
            Err(source) => return Err(fail(SeedStage::Users, report, source)),
        };
        if let Err(source) = self.seed_memberships(&users, &groups, &mut report).await {
            return Err(fail(SeedStage::Memberships, report, source));
        }

        info!(%report, "Seed complete");
        Ok(report)
    }

    async fn seed_roles(&self, report: &mut SeedReport) -> ServiceResult<Vec<Resolved<Role>>> {
        let service = RoleService::new(self.ctx);
        let mut roles = Vec::with_capacity(ROLE_GROUPS.len());

        for default in ROLE_GROUPS {
            let (role, created) = service
                .get_or_create_role(default.role, default.description)
                .await?;
            if created {
                report.roles_created.push(role.clone());
            } else {
                report.roles_existing.push(role.clone());
            }
            roles.push(Resolved { record: role, created });
        }
        Ok(roles)
    }

    async fn seed_groups(&self, report: &mut SeedReport) -> ServiceResult<Vec<Resolved<Group>>> {
        let service = GroupService::new(self.ctx);
        let mut groups = Vec::with_capacity(ROLE_GROUPS.len());

        for default in ROLE_GROUPS {
            let (group, created) = service.get_or_create_group(default.group).await?;
            if created {
                report.groups_created.push(group.clone());
            } else {
                report.groups_existing.push(group.clone());
            }
            groups.push(Resolved { record: group, created });
        }
        Ok(groups)
    }

    async fn seed_associations(
        &self,
        roles: &[Resolved<Role>],
        groups: &[Resolved<Group>],
        report: &mut SeedReport,
    ) -> ServiceResult<()> {
        let service = GroupService::new(self.ctx);

        for (role, group) in roles.iter().zip(groups) {
            let link = match self.options.association_policy {
                AssociationPolicy::NewlyCreatedOnly => {
                    if !(group.created && role.created) {
                        continue;
                    }
                    Some(service.assign_role(group.record.id, role.record.id).await?)
                }
                AssociationPolicy::EnsureExists => {
                    service.ensure_role(group.record.id, role.record.id).await?
                }
            };

            if let Some(link) = link {
                report.associations_created.push(link);
            }
        }
        Ok(())
    }

    async fn seed_users(&self, report: &mut SeedReport) -> ServiceResult<Vec<User>> {
        let factory = UserFactory::new(self.ctx);
        let mut users = Vec::with_capacity(ACCOUNTS.len());

        for account in ACCOUNTS {
            let request = CreateUserRequest::new(
                account.username,
                account.email,
                account.name,
                account.last_name,
            )
            .with_password(self.options.password_for(account.username));

            let user = factory.create_user(request).await?;
            report.users_created.push(user.clone());
            users.push(user);
        }
        Ok(users)
    }

    async fn seed_memberships(
        &self,
        users: &[User],
        groups: &[Resolved<Group>],
        report: &mut SeedReport,
    ) -> ServiceResult<()> {
        let service = UserService::new(self.ctx);

        for (account, user) in ACCOUNTS.iter().zip(users) {
            let Some(group) = groups.iter().find(|g| g.record.name == account.group) else {
                continue;
            };
            if service.add_to_group(user.id, group.record.id).await? {
                report.memberships_added.push((user.id, group.record.id));
            }
        }
        Ok(())
    }
}

fn fail(stage: SeedStage, partial: SeedReport, source: ServiceError) -> SeedFailure {
    warn!(%stage, error = %source, progress = %partial, "Seed stopped");
    SeedFailure {
        stage,
        partial,
        source,
    }
}
