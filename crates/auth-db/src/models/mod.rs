//! Database models - SQLx-compatible structs for PostgreSQL tables

mod group;
mod group_role;
mod history;
mod role;
mod user;

pub use group::GroupModel;
pub use group_role::GroupRoleModel;
pub use history::UserHistoryModel;
pub use role::RoleModel;
pub use user::UserModel;
