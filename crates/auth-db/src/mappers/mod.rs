//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects. History
//! rows use `TryFrom` because their enum columns are stored as text.

mod group;
mod history;
mod role;
mod user;

pub use history::changed_field_names;
