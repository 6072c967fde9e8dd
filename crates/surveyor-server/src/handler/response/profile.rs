//! Self-service profile response types.

use serde::Serialize;
use surveyor_policy::{Role, Section, assignable_roles};

use super::User;
use crate::store::UserRecord;

/// Navigation entry visible to the current user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionEntry {
    pub section: Section,
    pub path: &'static str,
    pub title: &'static str,
}

impl From<Section> for SectionEntry {
    fn from(section: Section) -> Self {
        Self {
            section,
            path: section.path(),
            title: section.title(),
        }
    }
}

/// The current user together with advisory permissions for the client.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(flatten)]
    pub user: User,
    /// Sections the user may open, in navigation order.
    pub sections: Vec<SectionEntry>,
    /// Roles the user may grant when creating or editing others.
    pub assignable_roles: Vec<Role>,
    /// Whether the user may open user management.
    pub can_manage_users: bool,
}

impl Profile {
    pub fn from_model(user: UserRecord) -> Self {
        let role = user.role;

        Self {
            sections: Section::visible_to(role)
                .into_iter()
                .map(SectionEntry::from)
                .collect(),
            assignable_roles: assignable_roles(role),
            can_manage_users: Section::Users.is_visible_to(role),
            user: User::from_model(user),
        }
    }
}
