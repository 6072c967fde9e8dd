//! User records and change sets.

use jiff::Timestamp;
use surveyor_policy::{Principal, Role, UserStatus};
use uuid::Uuid;

/// A user as held by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login e-mail, trimmed and lowercased.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Role currently held.
    pub role: Role,
    /// Whether the account may sign in.
    pub status: UserStatus,
    /// PHC-formatted argon2 password hash.
    pub password_hash: String,
    /// Timestamp when the user was created.
    pub created_at: Timestamp,
    /// Timestamp when the user was last updated.
    pub updated_at: Timestamp,
}

impl UserRecord {
    /// Returns the principal view of this user.
    #[inline]
    pub const fn principal(&self) -> Principal {
        Principal::new(self.id, self.role)
    }

    /// Returns whether the user may sign in and act.
    #[inline]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Login e-mail.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Role to grant.
    pub role: Role,
    /// Initial status.
    pub status: UserStatus,
    /// Hash of the initial password.
    pub password_hash: String,
}

/// Partial update of a user. Only fields set to `Some` are changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UpdateUser {
    /// New display name.
    pub full_name: Option<String>,
    /// New role.
    pub role: Option<Role>,
    /// New status.
    pub status: Option<UserStatus>,
}

impl UpdateUser {
    /// Returns whether the change set changes nothing.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.role.is_none() && self.status.is_none()
    }
}
