//! # auth-service
//!
//! Application layer: the user factory, the user/role/group services and the
//! explicit seed routine. Services borrow a [`ServiceContext`] that holds the
//! repositories, so the same code runs against PostgreSQL or the in-memory
//! store.

pub mod dto;
pub mod seed;
pub mod services;

pub use dto::{CreateUserRequest, ExtraFields, UserChanges};
pub use seed::{SeedFailure, SeedOptions, SeedReport, SeedRoutine, SeedStage};
pub use services::{
    GroupService, RoleService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, UserFactory, UserService,
};
