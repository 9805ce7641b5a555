//! Credential utilities

mod password;

pub use password::{
    hash_password, is_password_usable, make_unusable_password, verify_password, PasswordService,
    UNUSABLE_PASSWORD_PREFIX,
};
