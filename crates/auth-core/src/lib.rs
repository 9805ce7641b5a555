//! # auth-core
//!
//! Domain layer for the account model: users, roles, groups, group-role
//! associations and the per-user audit history, plus the repository traits
//! that the storage layer implements.
//! This crate has zero dependencies on infrastructure (database, runtime, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Group, GroupRole, HistoryChange, NewUser, Role, User, UserField, UserHistoryEntry,
    UserSnapshot,
};
pub use error::DomainError;
pub use traits::{
    GroupRepository, GroupRoleRepository, MembershipRepository, RepoResult, RoleRepository,
    UserHistoryRepository, UserRepository,
};
pub use value_objects::{GroupId, GroupRoleId, HistoryId, IdParseError, RoleId, UserId};
