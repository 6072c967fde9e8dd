//! Authorization denial to HTTP error conversion.

use surveyor_policy::{AuthError, ValidationError};

use super::http_error::{Error, ErrorKind};
use crate::TRACING_TARGET_AUTHORIZATION;

impl From<AuthError> for Error {
    fn from(error: AuthError) -> Self {
        tracing::warn!(
            target: TRACING_TARGET_AUTHORIZATION,
            kind = %error.kind(),
            error = %error,
            "authorization denied"
        );

        match error {
            AuthError::InsufficientPrivilege {
                acting_role,
                reason,
            } => ErrorKind::InsufficientPrivilege
                .with_message(capitalize(reason))
                .with_context(format!("acting role: {acting_role}"))
                .with_resource("users"),
            AuthError::PrivilegeEscalation {
                acting_role,
                requested_role,
            } => ErrorKind::PrivilegeEscalation
                .with_message(format!(
                    "The {acting_role} role may not assign the {requested_role} role"
                ))
                .with_resource("users"),
            AuthError::SelfDeletionForbidden => ErrorKind::SelfDeletionForbidden.into_error(),
            AuthError::SelfModificationForbidden => ErrorKind::SelfModificationForbidden
                .with_message("Use the profile endpoint to change your own name"),
            AuthError::Validation(error) => error.into(),
        }
    }
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        ErrorKind::ValidationError
            .with_message(capitalize(&error.to_string()))
            .with_resource(error.field())
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
