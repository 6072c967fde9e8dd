//! User management request types.

use serde::Deserialize;
use surveyor_policy::{Role, UserStatus};
use validator::Validate;

use super::validations::validate_full_name;
use crate::store;

/// Request payload to create a user.
///
/// E-mail shape and password length are checked by the authorization policy
/// after the privilege check, not here.
#[must_use]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// Login e-mail.
    pub email: String,
    /// Initial password.
    #[validate(length(max = 256))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,
    /// Role to grant.
    pub role: Role,
    /// Initial status, active unless given.
    #[serde(default)]
    pub status: UserStatus,
}

/// Request payload to update a user. Absent fields are left unchanged.
#[must_use]
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUser {
    /// New display name.
    #[validate(length(min = 1, max = 100))]
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: Option<String>,
    /// New role.
    pub role: Option<Role>,
    /// New status.
    pub status: Option<UserStatus>,
}

impl UpdateUser {
    /// Converts this request into a store change set.
    pub fn into_model(self) -> store::UpdateUser {
        store::UpdateUser {
            full_name: self.full_name,
            role: self.role,
            status: self.status,
        }
    }
}
