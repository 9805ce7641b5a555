//! User model → entity mapper

use auth_core::entities::User;
use auth_core::value_objects::UserId;

use crate::models::UserModel;

/// The password hash stays behind; it is only read through
/// `UserRepository::get_password_hash`.
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            username: model.username,
            email: model.email,
            name: model.name,
            last_name: model.last_name,
            role: model.role,
            is_active: model.is_active,
            is_staff: model.is_staff,
            is_superuser: model.is_superuser,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
