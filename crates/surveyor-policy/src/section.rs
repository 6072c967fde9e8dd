//! Role-gated dashboard sections.
//!
//! Clients use these to decide which navigation entries to render. The server
//! uses the same table to gate the user-management listing.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::role::Role;

/// A top-level section of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Section {
    /// Overview charts, visible to every signed-in user.
    Dashboard,
    /// User management.
    Users,
    /// Field surveys.
    Surveys,
    /// Municipality registry.
    Municipalities,
    /// Reports and exports.
    Reports,
    /// System settings.
    Settings,
}

impl Section {
    /// Returns the route path of this section.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Users => "/users",
            Self::Surveys => "/surveys",
            Self::Municipalities => "/municipalities",
            Self::Reports => "/reports",
            Self::Settings => "/settings",
        }
    }

    /// Returns the navigation label of this section.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Users => "Usuários",
            Self::Surveys => "Pesquisas",
            Self::Municipalities => "Municípios",
            Self::Reports => "Relatórios",
            Self::Settings => "Configurações",
        }
    }

    /// Returns whether a user holding `role` may open this section.
    pub const fn is_visible_to(self, role: Role) -> bool {
        use Role::{Analyst, Coordinator, Researcher};

        match self {
            Self::Dashboard => true,
            Self::Users | Self::Settings => role.is_administrator(),
            Self::Surveys => role.is_administrator() || matches!(role, Researcher | Coordinator),
            Self::Municipalities | Self::Reports => {
                role.is_administrator() || matches!(role, Analyst | Coordinator)
            }
        }
    }

    /// Returns every section visible to `role`, in navigation order.
    pub fn visible_to(role: Role) -> Vec<Self> {
        Self::iter()
            .filter(|section| section.is_visible_to(role))
            .collect()
    }

    /// Finds the section mounted at `path`.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::iter().find(|section| section.path() == path)
    }

    /// Returns whether `role` may open the route at `path`.
    ///
    /// Unknown paths are denied.
    pub fn has_access(role: Role, path: &str) -> bool {
        Self::from_path(path).is_some_and(|section| section.is_visible_to(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn administrators_see_everything() {
        let all: Vec<Section> = Section::iter().collect();
        assert_eq!(Section::visible_to(Role::Administrator), all);
        assert_eq!(Section::visible_to(Role::Superadmin), all);
    }

    #[test]
    fn standard_roles_see_their_sections() {
        assert_eq!(
            Section::visible_to(Role::Researcher),
            vec![Section::Dashboard, Section::Surveys]
        );
        assert_eq!(
            Section::visible_to(Role::Analyst),
            vec![Section::Dashboard, Section::Municipalities, Section::Reports]
        );
        assert_eq!(
            Section::visible_to(Role::Coordinator),
            vec![
                Section::Dashboard,
                Section::Surveys,
                Section::Municipalities,
                Section::Reports
            ]
        );
    }

    #[test]
    fn access_by_path() {
        assert!(Section::has_access(Role::Analyst, "/reports"));
        assert!(!Section::has_access(Role::Analyst, "/users"));
        assert!(Section::has_access(Role::Superadmin, "/settings"));
        assert!(!Section::has_access(Role::Superadmin, "/unknown"));
    }
}
