//! Group model → entity mapper

use auth_core::entities::Group;
use auth_core::value_objects::GroupId;

use crate::models::GroupModel;

impl From<GroupModel> for Group {
    fn from(model: GroupModel) -> Self {
        Group {
            id: GroupId::new(model.id),
            name: model.name,
        }
    }
}
