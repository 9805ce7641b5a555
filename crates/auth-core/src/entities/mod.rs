//! Domain entities - core business objects

mod group;
mod group_role;
mod history;
mod role;
mod user;

pub use group::Group;
pub use group_role::GroupRole;
pub use history::{HistoryChange, UserField, UserHistoryEntry, UserSnapshot};
pub use role::Role;
pub use user::{NewUser, User};
