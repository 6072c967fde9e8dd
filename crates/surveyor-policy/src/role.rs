//! Role and account status enumerations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Privilege level held by exactly one per user.
///
/// The hierarchy is `superadmin > administrator > {researcher, analyst, coordinator}`.
/// The three standard roles are peers and carry no privilege over each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Full control, including over administrators and other superadmins.
    Superadmin,
    /// Manages standard-role users and dashboard settings.
    Administrator,
    /// Conducts field surveys.
    Researcher,
    /// Reviews municipalities and reports.
    Analyst,
    /// Coordinates surveys, municipalities and reports.
    Coordinator,
}

impl Role {
    /// Returns whether this is the superadmin role.
    #[inline]
    pub const fn is_superadmin(self) -> bool {
        matches!(self, Self::Superadmin)
    }

    /// Returns whether this role has administrator capabilities.
    ///
    /// Superadmins inherit every administrator capability.
    #[inline]
    pub const fn is_administrator(self) -> bool {
        matches!(self, Self::Administrator | Self::Superadmin)
    }

    /// Returns whether this role carries elevated privilege.
    #[inline]
    pub const fn is_elevated(self) -> bool {
        self.is_administrator()
    }

    /// Returns whether this is one of the peer standard roles.
    #[inline]
    pub const fn is_standard(self) -> bool {
        !self.is_elevated()
    }

    /// Returns the hierarchical level of this role (higher number = more privilege).
    #[inline]
    pub const fn hierarchy_level(self) -> u8 {
        match self {
            Self::Superadmin => 3,
            Self::Administrator => 2,
            Self::Researcher | Self::Analyst | Self::Coordinator => 1,
        }
    }

    /// Returns whether this role ranks strictly above the other one.
    #[inline]
    pub const fn outranks(self, other: Role) -> bool {
        self.hierarchy_level() > other.hierarchy_level()
    }

    /// Returns the lowercase identifier of this role.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Account status of a user.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserStatus {
    /// The user may sign in and act.
    #[default]
    Active,
    /// The user is blocked from signing in.
    Inactive,
}

impl UserStatus {
    /// Returns whether the account is active.
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}
