//! Role and group-role model → entity mappers

use auth_core::entities::{GroupRole, Role};
use auth_core::value_objects::{GroupId, GroupRoleId, RoleId};

use crate::models::{GroupRoleModel, RoleModel};

impl From<RoleModel> for Role {
    fn from(model: RoleModel) -> Self {
        Role {
            id: RoleId::new(model.id),
            name: model.name,
            description: model.description,
        }
    }
}

impl From<GroupRoleModel> for GroupRole {
    fn from(model: GroupRoleModel) -> Self {
        GroupRole {
            id: GroupRoleId::new(model.id),
            group_id: GroupId::new(model.group_id),
            role_id: RoleId::new(model.role_id),
        }
    }
}
