//! What a seed run did

use std::fmt;

use auth_core::entities::{Group, GroupRole, Role, User};
use auth_core::value_objects::{GroupId, UserId};

use crate::services::ServiceError;

/// Records touched by one seed run
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub roles_created: Vec<Role>,
    pub roles_existing: Vec<Role>,
    pub groups_created: Vec<Group>,
    pub groups_existing: Vec<Group>,
    pub associations_created: Vec<GroupRole>,
    pub users_created: Vec<User>,
    /// Memberships that did not exist before this run
    pub memberships_added: Vec<(UserId, GroupId)>,
}

impl SeedReport {
    /// True when the run found everything in place and created nothing
    pub fn is_noop(&self) -> bool {
        self.roles_created.is_empty()
            && self.groups_created.is_empty()
            && self.associations_created.is_empty()
            && self.users_created.is_empty()
            && self.memberships_added.is_empty()
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "roles {} created / {} existing, groups {} created / {} existing, \
             {} associations, {} users, {} memberships",
            self.roles_created.len(),
            self.roles_existing.len(),
            self.groups_created.len(),
            self.groups_existing.len(),
            self.associations_created.len(),
            self.users_created.len(),
            self.memberships_added.len(),
        )
    }
}

/// Seed step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStage {
    Roles,
    Groups,
    Associations,
    Users,
    Memberships,
}

impl SeedStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roles => "roles",
            Self::Groups => "groups",
            Self::Associations => "associations",
            Self::Users => "users",
            Self::Memberships => "memberships",
        }
    }
}

impl fmt::Display for SeedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seed run that stopped early
///
/// Work done before the failing step stays committed; `partial` lists it.
#[derive(Debug)]
pub struct SeedFailure {
    pub stage: SeedStage,
    pub partial: SeedReport,
    pub source: ServiceError,
}

impl fmt::Display for SeedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seeding failed at {}: {}", self.stage, self.source)
    }
}

impl std::error::Error for SeedFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
