//! Group-role association

use crate::value_objects::{GroupId, GroupRoleId, RoleId};

use super::{Group, Role};

/// Links one group to one role
///
/// The pair is not unique: creating the same link twice yields two rows.
/// Rows disappear when either endpoint is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRole {
    pub id: GroupRoleId,
    pub group_id: GroupId,
    pub role_id: RoleId,
}

impl GroupRole {
    /// Check whether this association joins the given endpoints
    #[inline]
    pub fn links(&self, group_id: GroupId, role_id: RoleId) -> bool {
        self.group_id == group_id && self.role_id == role_id
    }

    /// Human readable label, e.g. `admin_group - admin`
    pub fn label(group: &Group, role: &Role) -> String {
        format!("{} - {}", group.name, role.name)
    }
}
