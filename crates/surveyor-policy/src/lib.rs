#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod policy;
mod principal;
mod role;
mod section;
mod validation;

pub mod prelude;

pub use crate::error::{AuthError, AuthErrorKind, Result, ValidationError};
pub use crate::policy::{
    assignable_roles, authorize_user_create, authorize_user_delete, authorize_user_update,
    can_assign_role, can_delete, can_modify,
};
pub use crate::principal::Principal;
pub use crate::role::{Role, UserStatus};
pub use crate::section::Section;
pub use crate::validation::{
    Credentials, MIN_PASSWORD_LENGTH, validate_credentials, validate_email, validate_password,
};
