//! Repository traits (ports)

mod repositories;

pub use repositories::{
    GroupRepository, GroupRoleRepository, MembershipRepository, RepoResult, RoleRepository,
    UserHistoryRepository, UserRepository,
};
