//! The acting principal and its convenience predicates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::policy;
use crate::role::Role;
use crate::validation::Credentials;

/// A user identity paired with the role it holds at evaluation time.
///
/// Used both for the acting principal and for the target user. The role must
/// be a fresh snapshot; a `Principal` should not outlive the request it was
/// read for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Stable identifier of the user.
    pub user_id: Uuid,
    /// Role held by the user.
    pub role: Role,
}

impl Principal {
    /// Creates a new principal.
    #[inline]
    pub const fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns whether both principals are the same user.
    #[inline]
    pub fn is_same_user(&self, other: &Principal) -> bool {
        self.user_id == other.user_id
    }

    /// Returns whether this principal may edit the target through user management.
    ///
    /// Unlike [`policy::can_modify`], this also denies self-targeting.
    pub fn can_modify(&self, target: &Principal) -> bool {
        !self.is_same_user(target) && policy::can_modify(self.role, target.role)
    }

    /// Returns whether this principal may delete the target.
    pub fn can_delete(&self, target: &Principal) -> bool {
        policy::can_delete(self.role, target.role, self.user_id, target.user_id)
    }

    /// Returns whether this principal may grant the role.
    pub fn can_assign_role(&self, role: Role) -> bool {
        policy::can_assign_role(self.role, role)
    }

    /// See [`policy::authorize_user_create`].
    pub fn authorize_create(&self, new_user_role: Role, credentials: Credentials<'_>) -> Result {
        policy::authorize_user_create(self.role, new_user_role, credentials)
    }

    /// See [`policy::authorize_user_update`].
    ///
    /// Fails with [`AuthError::SelfModificationForbidden`] when the target is
    /// this principal.
    pub fn authorize_update(&self, target: &Principal, role_change: Option<Role>) -> Result {
        if self.is_same_user(target) {
            return Err(AuthError::SelfModificationForbidden);
        }

        policy::authorize_user_update(self.role, target.role, role_change)
    }

    /// See [`policy::authorize_user_delete`].
    pub fn authorize_delete(&self, target: &Principal) -> Result {
        policy::authorize_user_delete(self.role, target.role, self.user_id, target.user_id)
    }
}
