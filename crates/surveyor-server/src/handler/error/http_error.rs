//! HTTP error handling with builder pattern for dynamic error responses.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::ErrorResponse;

/// The error type for HTTP handlers in the server.
#[derive(Clone, Default)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error {
    kind: ErrorKind,
    context: Option<Cow<'static, str>>,
    message: Option<Cow<'static, str>>,
    resource: Option<Cow<'static, str>>,
}

impl Error {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            message: None,
            resource: None,
        }
    }

    /// Attaches internal context information to the error.
    ///
    /// Context is logged but never sent to the client.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'static, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Sets a custom user-friendly message for the error.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Sets the resource that caused the error.
    #[inline]
    pub fn with_resource(self, resource: impl Into<Cow<'static, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the context if present.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the custom message if present.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the resource if present.
    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();

        let mut debug_struct = f.debug_struct("Error");
        debug_struct
            .field("kind", &self.kind)
            .field("name", &response.name)
            .field("status", &response.status);

        if let Some(ref context) = self.context {
            debug_struct.field("context", context);
        }

        if let Some(ref message) = self.message {
            debug_struct.field("custom_message", message);
        }

        if let Some(ref resource) = self.resource {
            debug_struct.field("custom_resource", resource);
        }

        debug_struct.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or(response.message.as_ref());

        write!(f, "{} ({}): {}", response.name, response.status, message)?;

        if let Some(ref context) = self.context {
            write!(f, " - {}", context)?;
        }

        if let Some(ref resource) = self.resource {
            write!(f, " [resource: {}]", resource)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let mut response = self.kind.response_with_suggestion();

        if let Some(message) = self.message {
            response = response.with_message(message);
        }

        if let Some(resource) = self.resource {
            response = response.with_resource(resource);
        }

        if let Some(context) = self.context {
            response = response.with_context(context);
        }

        response.into_response()
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// A specialized [`Result`] type for HTTP operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Enumeration of all possible HTTP error kinds.
///
/// Each variant corresponds to a specific status code and machine-readable
/// `name` in the response body.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 4xx Client Errors
    /// 400 Bad Request - Missing required path parameter
    MissingPathParam,
    /// 400 Bad Request - Invalid request data
    BadRequest,
    /// 400 Bad Request - Malformed e-mail or too short password
    ValidationError,
    /// 400 Bad Request - A user targeted their own account for deletion
    SelfDeletionForbidden,
    /// 400 Bad Request - A user targeted their own account through user management
    SelfModificationForbidden,
    /// 401 Unauthorized - Missing authentication token
    MissingAuthToken,
    /// 401 Unauthorized - Malformed authentication token
    MalformedAuthToken,
    /// 401 Unauthorized - Expired authentication token
    ExpiredAuthToken,
    /// 401 Unauthorized - Invalid credentials
    Unauthorized,
    /// 403 Forbidden - Access denied
    Forbidden,
    /// 403 Forbidden - The account has been deactivated
    InactiveAccount,
    /// 403 Forbidden - The actor lacks the rank to act on the target
    InsufficientPrivilege,
    /// 403 Forbidden - The actor tried to grant a role above their authority
    PrivilegeEscalation,
    /// 404 Not Found - Resource not found
    NotFound,
    /// 409 Conflict - Conflicting resource state
    Conflict,

    // 5xx Server Errors
    /// 500 Internal Server Error - Unexpected server error
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Converts this error kind into a full [`Error`].
    #[inline]
    pub const fn into_error(self) -> Error {
        Error::new(self)
    }

    /// Creates an [`Error`] with the specified context.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'static, str>>) -> Error {
        Error::new(self).with_context(context)
    }

    /// Creates an [`Error`] with the specified message.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'static, str>>) -> Error {
        Error::new(self).with_message(message)
    }

    /// Creates an [`Error`] with the specified resource.
    #[inline]
    pub fn with_resource(self, resource: impl Into<Cow<'static, str>>) -> Error {
        Error::new(self).with_resource(resource)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the response preset of this error kind.
    pub const fn response(self) -> ErrorResponse {
        match self {
            Self::MissingPathParam => ErrorResponse::MISSING_PATH_PARAM,
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::ValidationError => ErrorResponse::VALIDATION_ERROR,
            Self::SelfDeletionForbidden => ErrorResponse::SELF_DELETION_FORBIDDEN,
            Self::SelfModificationForbidden => ErrorResponse::SELF_MODIFICATION_FORBIDDEN,
            Self::MissingAuthToken => ErrorResponse::MISSING_AUTH_TOKEN,
            Self::MalformedAuthToken => ErrorResponse::MALFORMED_AUTH_TOKEN,
            Self::ExpiredAuthToken => ErrorResponse::EXPIRED_AUTH_TOKEN,
            Self::Unauthorized => ErrorResponse::UNAUTHORIZED,
            Self::Forbidden => ErrorResponse::FORBIDDEN,
            Self::InactiveAccount => ErrorResponse::INACTIVE_ACCOUNT,
            Self::InsufficientPrivilege => ErrorResponse::INSUFFICIENT_PRIVILEGE,
            Self::PrivilegeEscalation => ErrorResponse::PRIVILEGE_ESCALATION,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::Conflict => ErrorResponse::CONFLICT,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a hint on how the client can recover, if there is one.
    pub const fn suggestion(self) -> Option<&'static str> {
        match self {
            Self::ExpiredAuthToken | Self::MalformedAuthToken | Self::MissingAuthToken => {
                Some("Sign in again to obtain a new access token")
            }
            Self::InactiveAccount => Some("Ask an administrator to reactivate the account"),
            Self::PrivilegeEscalation => Some("Choose a role your own role is allowed to grant"),
            Self::SelfModificationForbidden => Some("Use the profile page to edit your own account"),
            Self::SelfDeletionForbidden => Some("Ask another administrator to remove the account"),
            _ => None,
        }
    }

    /// Returns the response preset with its suggestion attached.
    fn response_with_suggestion(self) -> ErrorResponse {
        let response = self.response();
        match self.suggestion() {
            Some(suggestion) => response.with_suggestion(suggestion),
            None => response,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.response().name)
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response_with_suggestion().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_http_error() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        let _ = error.into_response();
    }

    #[test]
    fn escalation_carries_suggestion() {
        let response = ErrorKind::PrivilegeEscalation.response_with_suggestion();
        assert!(response.suggestion.is_some());
        assert!(ErrorKind::NotFound.suggestion().is_none());
    }

    #[test]
    fn error_builder_chaining() {
        let error = ErrorKind::NotFound
            .with_message("User not found")
            .with_resource("user")
            .with_context("id: 123");

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("User not found"));
        assert_eq!(error.resource(), Some("user"));
        assert_eq!(error.context(), Some("id: 123"));
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            ErrorKind::InsufficientPrivilege.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorKind::PrivilegeEscalation.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorKind::SelfDeletionForbidden.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorKind::ValidationError.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorKind::ExpiredAuthToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorKind::Conflict.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn std_fmt_display() {
        let error = ErrorKind::NotFound
            .with_message("User not found")
            .with_resource("user")
            .with_context("id: 123");

        let display = error.to_string();
        assert!(display.contains("not_found"));
        assert!(display.contains("404"));
        assert!(display.contains("User not found"));
        assert!(display.contains("id: 123"));
        assert!(display.contains("user"));
    }

    #[test]
    fn kind_display_is_response_name() {
        assert_eq!(
            ErrorKind::PrivilegeEscalation.to_string(),
            "privilege_escalation"
        );
    }

    #[test]
    fn std_error_trait() {
        let error = Error::new(ErrorKind::BadRequest);
        let _: &dyn std::error::Error = &error;
    }
}
