//! Data Transfer Objects
//!
//! Inputs accepted by the services, validated with `validator`.

mod requests;

pub use requests::{CreateUserRequest, ExtraFields, UserChanges};
