//! Authorization and validation error types.
//!
//! Every denial is an expected, recoverable outcome. Callers translate the
//! variant into a user-facing message and a transport status of their own.

use std::fmt;

use crate::role::Role;

/// Result type alias for policy decisions.
pub type Result<T = (), E = AuthError> = std::result::Result<T, E>;

/// Reason an authorization request was denied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[must_use = "authorization errors should be surfaced to the caller"]
pub enum AuthError {
    /// The actor lacks the rank to act on the target.
    #[error("insufficient privilege: {reason}")]
    InsufficientPrivilege {
        /// Role of the acting principal.
        acting_role: Role,
        /// Human-readable denial reason.
        reason: &'static str,
    },

    /// The actor attempted to grant a role above their granting authority.
    #[error("privilege escalation: {acting_role} may not assign the {requested_role} role")]
    PrivilegeEscalation {
        /// Role of the acting principal.
        acting_role: Role,
        /// Role the actor attempted to grant.
        requested_role: Role,
    },

    /// The actor targeted their own account for deletion.
    #[error("users cannot delete their own account")]
    SelfDeletionForbidden,

    /// The actor targeted their own account through user management.
    #[error("users cannot modify their own account through user management")]
    SelfModificationForbidden,

    /// The request carried malformed input.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AuthError {
    /// Creates an [`AuthError::InsufficientPrivilege`] error.
    #[inline]
    pub const fn insufficient_privilege(acting_role: Role, reason: &'static str) -> Self {
        Self::InsufficientPrivilege {
            acting_role,
            reason,
        }
    }

    /// Creates an [`AuthError::PrivilegeEscalation`] error.
    #[inline]
    pub const fn privilege_escalation(acting_role: Role, requested_role: Role) -> Self {
        Self::PrivilegeEscalation {
            acting_role,
            requested_role,
        }
    }

    /// Returns the kind of this error.
    pub const fn kind(&self) -> AuthErrorKind {
        match self {
            Self::InsufficientPrivilege { .. } => AuthErrorKind::InsufficientPrivilege,
            Self::PrivilegeEscalation { .. } => AuthErrorKind::PrivilegeEscalation,
            Self::SelfDeletionForbidden => AuthErrorKind::SelfDeletionForbidden,
            Self::SelfModificationForbidden => AuthErrorKind::SelfModificationForbidden,
            Self::Validation(_) => AuthErrorKind::Validation,
        }
    }
}

/// Discriminant of [`AuthError`], for matching and machine-readable codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    /// See [`AuthError::InsufficientPrivilege`].
    InsufficientPrivilege,
    /// See [`AuthError::PrivilegeEscalation`].
    PrivilegeEscalation,
    /// See [`AuthError::SelfDeletionForbidden`].
    SelfDeletionForbidden,
    /// See [`AuthError::SelfModificationForbidden`].
    SelfModificationForbidden,
    /// See [`AuthError::Validation`].
    Validation,
}

impl AuthErrorKind {
    /// Returns the snake_case code of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InsufficientPrivilege => "insufficient_privilege",
            Self::PrivilegeEscalation => "privilege_escalation",
            Self::SelfDeletionForbidden => "self_deletion_forbidden",
            Self::SelfModificationForbidden => "self_modification_forbidden",
            Self::Validation => "validation_error",
        }
    }

    /// Returns whether the denial is about rank rather than input or self-targeting.
    #[must_use]
    pub const fn is_privilege_denial(self) -> bool {
        matches!(self, Self::InsufficientPrivilege | Self::PrivilegeEscalation)
    }
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Malformed input unrelated to privilege.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[must_use = "validation errors should be surfaced to the caller"]
pub enum ValidationError {
    /// The e-mail address does not look like `local@domain.tld`.
    #[error("invalid email format")]
    MalformedEmail,

    /// The password is shorter than the minimum length.
    #[error("password must be at least {min_length} characters")]
    PasswordTooShort {
        /// Minimum accepted number of characters.
        min_length: usize,
    },
}

impl ValidationError {
    /// Returns the name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MalformedEmail => "email",
            Self::PasswordTooShort { .. } => "password",
        }
    }
}
