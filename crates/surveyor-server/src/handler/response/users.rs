//! User response types.

use jiff::Timestamp;
use serde::Serialize;
use surveyor_policy::{Principal, Role, UserStatus};
use uuid::Uuid;

use crate::store::UserRecord;

/// Represents a user.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier of the user.
    pub user_id: Uuid,
    /// Login e-mail.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Role currently held.
    pub role: Role,
    /// Whether the account may sign in.
    pub status: UserStatus,

    /// Timestamp when the user was created.
    pub created_at: Timestamp,
    /// Timestamp when the user was last updated.
    pub updated_at: Timestamp,
}

impl User {
    pub fn from_model(user: UserRecord) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            status: user.status,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// A user as seen from the management screen of a given actor.
///
/// The flags are advisory; the server re-checks on every mutation.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedUser {
    #[serde(flatten)]
    pub user: User,
    /// Whether the actor may edit this user.
    pub can_edit: bool,
    /// Whether the actor may delete this user.
    pub can_delete: bool,
}

impl ManagedUser {
    /// Builds the view of `user` for `actor`.
    pub fn from_model(actor: &Principal, user: UserRecord) -> Self {
        let target = user.principal();

        Self {
            can_edit: actor.can_modify(&target),
            can_delete: actor.can_delete(&target),
            user: User::from_model(user),
        }
    }
}
