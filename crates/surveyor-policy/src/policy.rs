//! Authorization decisions for user management.
//!
//! The predicates in this module are pure functions of their arguments. They
//! never consult ambient state, so callers must pass the role they have just
//! read from the authoritative store; a downgrade is then honoured by the very
//! next call.

use strum::IntoEnumIterator;
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::role::Role;
use crate::validation::{Credentials, validate_credentials};

const ONLY_SUPERADMINS_MODIFY_ADMINISTRATORS: &str = "only superadmins may modify administrators";
const ONLY_ADMINISTRATORS_MODIFY_USERS: &str = "only administrators may modify users";
const ONLY_SUPERADMINS_DELETE_ADMINISTRATORS: &str = "only superadmins may delete administrators";
const ONLY_ADMINISTRATORS_DELETE_USERS: &str = "only administrators may delete users";
const ONLY_ADMINISTRATORS_CREATE_USERS: &str = "only administrators may create users";

/// Returns whether `acting_role` may modify a user holding `target_role`.
///
/// Superadmins may modify anyone. Everyone else is barred from elevated
/// targets, and among the rest only administrators may modify standard users.
pub const fn can_modify(acting_role: Role, target_role: Role) -> bool {
    if acting_role.is_superadmin() {
        return true;
    }

    if target_role.is_elevated() {
        return false;
    }

    matches!(acting_role, Role::Administrator)
}

/// Returns whether the actor may delete the target.
///
/// Self-deletion is always denied, whatever the role.
pub fn can_delete(
    acting_role: Role,
    target_role: Role,
    acting_user_id: Uuid,
    target_user_id: Uuid,
) -> bool {
    acting_user_id != target_user_id && can_modify(acting_role, target_role)
}

/// Returns whether `acting_role` may grant `role_being_assigned` to someone.
///
/// Elevated roles can only be granted by superadmins; standard roles by any
/// administrator.
pub const fn can_assign_role(acting_role: Role, role_being_assigned: Role) -> bool {
    if role_being_assigned.is_elevated() {
        acting_role.is_superadmin()
    } else {
        acting_role.is_administrator()
    }
}

/// Returns every role `acting_role` is allowed to grant, in declaration order.
pub fn assignable_roles(acting_role: Role) -> Vec<Role> {
    Role::iter()
        .filter(|role| can_assign_role(acting_role, *role))
        .collect()
}

/// Authorizes creating a user with `new_user_role` and the given credentials.
///
/// Privilege is checked before input: an actor who may grant no role at all
/// gets [`AuthError::InsufficientPrivilege`], an administrator asking for an
/// elevated role gets [`AuthError::PrivilegeEscalation`]. Malformed input is
/// reported as [`AuthError::Validation`].
pub fn authorize_user_create(
    acting_role: Role,
    new_user_role: Role,
    credentials: Credentials<'_>,
) -> Result {
    if !can_assign_role(acting_role, new_user_role) {
        return Err(if acting_role.is_administrator() {
            AuthError::privilege_escalation(acting_role, new_user_role)
        } else {
            AuthError::insufficient_privilege(acting_role, ONLY_ADMINISTRATORS_CREATE_USERS)
        });
    }

    validate_credentials(credentials)?;
    Ok(())
}

/// Authorizes updating a user that currently holds `target_role`.
///
/// When `role_change` names a role different from `target_role`, the actor must
/// also be allowed to grant it.
pub fn authorize_user_update(
    acting_role: Role,
    target_role: Role,
    role_change: Option<Role>,
) -> Result {
    if !can_modify(acting_role, target_role) {
        let reason = if target_role.is_elevated() {
            ONLY_SUPERADMINS_MODIFY_ADMINISTRATORS
        } else {
            ONLY_ADMINISTRATORS_MODIFY_USERS
        };

        return Err(AuthError::insufficient_privilege(acting_role, reason));
    }

    match role_change {
        Some(new_role) if new_role != target_role && !can_assign_role(acting_role, new_role) => {
            Err(AuthError::privilege_escalation(acting_role, new_role))
        }
        _ => Ok(()),
    }
}

/// Authorizes deleting a user that currently holds `target_role`.
pub fn authorize_user_delete(
    acting_role: Role,
    target_role: Role,
    acting_user_id: Uuid,
    target_user_id: Uuid,
) -> Result {
    if acting_user_id == target_user_id {
        return Err(AuthError::SelfDeletionForbidden);
    }

    if !can_modify(acting_role, target_role) {
        let reason = if target_role.is_elevated() {
            ONLY_SUPERADMINS_DELETE_ADMINISTRATORS
        } else {
            ONLY_ADMINISTRATORS_DELETE_USERS
        };

        return Err(AuthError::insufficient_privilege(acting_role, reason));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthErrorKind, ValidationError};

    const STANDARD: [Role; 3] = [Role::Researcher, Role::Analyst, Role::Coordinator];

    fn valid() -> Credentials<'static> {
        Credentials::new("new.user@example.com", "secret1")
    }

    #[test]
    fn superadmin_modifies_every_role() {
        for target in Role::iter() {
            assert!(can_modify(Role::Superadmin, target), "{target}");
        }
    }

    #[test]
    fn non_superadmins_never_modify_elevated_roles() {
        for acting in Role::iter().filter(|role| !role.is_superadmin()) {
            assert!(!can_modify(acting, Role::Administrator), "{acting}");
            assert!(!can_modify(acting, Role::Superadmin), "{acting}");
        }
    }

    #[test]
    fn administrator_modifies_standard_roles() {
        for target in STANDARD {
            assert!(can_modify(Role::Administrator, target), "{target}");
        }
    }

    #[test]
    fn standard_roles_modify_no_one() {
        for acting in STANDARD {
            for target in Role::iter() {
                assert!(!can_modify(acting, target), "{acting} -> {target}");
            }
        }
    }

    #[test]
    fn self_deletion_is_always_denied() {
        let id = Uuid::new_v4();
        for acting in Role::iter() {
            for target in Role::iter() {
                assert!(!can_delete(acting, target, id, id));
                assert_eq!(
                    authorize_user_delete(acting, target, id, id),
                    Err(AuthError::SelfDeletionForbidden)
                );
            }
        }
    }

    #[test]
    fn role_assignment_rules() {
        assert!(!can_assign_role(Role::Administrator, Role::Administrator));
        assert!(!can_assign_role(Role::Administrator, Role::Superadmin));
        assert!(can_assign_role(Role::Superadmin, Role::Administrator));
        assert!(can_assign_role(Role::Superadmin, Role::Superadmin));
        assert!(can_assign_role(Role::Administrator, Role::Researcher));

        for acting in STANDARD {
            for role in Role::iter() {
                assert!(!can_assign_role(acting, role));
            }
        }
    }

    #[test]
    fn assignable_roles_per_actor() {
        assert_eq!(assignable_roles(Role::Superadmin).len(), 5);
        assert_eq!(assignable_roles(Role::Administrator), STANDARD.to_vec());
        assert!(assignable_roles(Role::Analyst).is_empty());
    }

    #[test]
    fn decisions_are_repeatable() {
        for acting in Role::iter() {
            for target in Role::iter() {
                assert_eq!(can_modify(acting, target), can_modify(acting, target));
                assert_eq!(
                    can_assign_role(acting, target),
                    can_assign_role(acting, target)
                );
            }
        }
    }

    #[test]
    fn administrator_deletes_researcher() {
        let result = authorize_user_delete(
            Role::Administrator,
            Role::Researcher,
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn administrator_cannot_rename_administrator() {
        let error = authorize_user_update(Role::Administrator, Role::Administrator, None)
            .unwrap_err();
        assert_eq!(error.kind(), AuthErrorKind::InsufficientPrivilege);
        assert_eq!(
            error,
            AuthError::insufficient_privilege(
                Role::Administrator,
                ONLY_SUPERADMINS_MODIFY_ADMINISTRATORS
            )
        );
    }

    #[test]
    fn administrator_cannot_create_superadmin() {
        let error = authorize_user_create(Role::Administrator, Role::Superadmin, valid())
            .unwrap_err();
        assert_eq!(
            error,
            AuthError::privilege_escalation(Role::Administrator, Role::Superadmin)
        );
    }

    #[test]
    fn standard_role_cannot_create_anyone() {
        let error = authorize_user_create(Role::Coordinator, Role::Researcher, valid())
            .unwrap_err();
        assert_eq!(error.kind(), AuthErrorKind::InsufficientPrivilege);
    }

    #[test]
    fn create_reports_validation_separately() {
        let error = authorize_user_create(
            Role::Administrator,
            Role::Analyst,
            Credentials::new("not-an-email", "secret1"),
        )
        .unwrap_err();
        assert_eq!(error, AuthError::Validation(ValidationError::MalformedEmail));

        let error = authorize_user_create(
            Role::Superadmin,
            Role::Administrator,
            Credentials::new("ok@example.com", "12345"),
        )
        .unwrap_err();
        assert_eq!(
            error,
            AuthError::Validation(ValidationError::PasswordTooShort { min_length: 6 })
        );

        assert_eq!(
            authorize_user_create(Role::Administrator, Role::Analyst, valid()),
            Ok(())
        );
    }

    #[test]
    fn superadmin_deletes_administrator() {
        let result = authorize_user_delete(
            Role::Superadmin,
            Role::Administrator,
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn coordinator_cannot_edit_researcher() {
        let error = authorize_user_update(Role::Coordinator, Role::Researcher, None).unwrap_err();
        assert_eq!(error.kind(), AuthErrorKind::InsufficientPrivilege);
    }

    #[test]
    fn promotion_by_administrator_is_escalation() {
        let error =
            authorize_user_update(Role::Administrator, Role::Researcher, Some(Role::Administrator))
                .unwrap_err();
        assert_eq!(error.kind(), AuthErrorKind::PrivilegeEscalation);

        assert_eq!(
            authorize_user_update(Role::Superadmin, Role::Researcher, Some(Role::Administrator)),
            Ok(())
        );
    }

    #[test]
    fn reassigning_current_role_is_checked_like_any_edit() {
        assert_eq!(
            authorize_user_update(Role::Administrator, Role::Analyst, Some(Role::Analyst)),
            Ok(())
        );
        assert_eq!(
            authorize_user_update(Role::Analyst, Role::Analyst, Some(Role::Analyst))
                .unwrap_err()
                .kind(),
            AuthErrorKind::InsufficientPrivilege
        );
    }

    #[test]
    fn downgrade_revokes_on_next_call() {
        let actor = Uuid::new_v4();
        let target = Uuid::new_v4();

        let mut acting_role = Role::Administrator;
        assert!(can_delete(acting_role, Role::Researcher, actor, target));

        acting_role = Role::Researcher;
        assert!(!can_delete(acting_role, Role::Researcher, actor, target));
    }
}
