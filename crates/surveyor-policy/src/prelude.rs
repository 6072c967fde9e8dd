//! Convenient re-exports for policy consumers.

pub use crate::{
    AuthError, AuthErrorKind, Credentials, Principal, Role, Section, UserStatus, ValidationError,
};
pub use crate::{
    authorize_user_create, authorize_user_delete, authorize_user_update, can_assign_role,
    can_delete, can_modify,
};
