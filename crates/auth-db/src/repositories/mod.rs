//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in auth-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod group;
mod group_role;
mod history;
mod membership;
mod role;
mod user;

pub use group::PgGroupRepository;
pub use group_role::PgGroupRoleRepository;
pub use history::PgUserHistoryRepository;
pub use membership::PgMembershipRepository;
pub use role::PgRoleRepository;
pub use user::PgUserRepository;
