//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and orchestrates
//! repository calls for one part of the account model.

pub mod context;
pub mod error;
pub mod factory;
pub mod group;
pub mod role;
pub mod user;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use factory::UserFactory;
pub use group::GroupService;
pub use role::RoleService;
pub use user::UserService;
