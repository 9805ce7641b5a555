//! Group entity - an authorization group users can belong to

use std::fmt;

use crate::value_objects::GroupId;

/// Authorization group with a unique name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
