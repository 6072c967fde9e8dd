use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Tracing target for error responses.
const TRACING_TARGET: &str = "surveyor_server::handler::response";

/// Serialized body of every error response.
///
/// `context` and `status` are kept for logging only and never sent to the
/// client.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Machine-readable error name.
    pub name: Cow<'static, str>,
    /// User-friendly error message safe for client display.
    pub message: Cow<'static, str>,
    /// The resource that the error relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'static, str>>,
    /// Helpful suggestion for resolving the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Cow<'static, str>>,

    /// Internal context for debugging.
    #[serde(skip)]
    pub context: Option<Cow<'static, str>>,
    /// HTTP status code.
    #[serde(skip)]
    pub status: StatusCode,
}

impl ErrorResponse {
    // 400
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Invalid request data.",
        StatusCode::BAD_REQUEST,
    );
    pub const MISSING_PATH_PARAM: Self = Self::new(
        "missing_path_param",
        "Missing path parameter.",
        StatusCode::BAD_REQUEST,
    );
    pub const SELF_DELETION_FORBIDDEN: Self = Self::new(
        "self_deletion_forbidden",
        "You cannot delete your own account.",
        StatusCode::BAD_REQUEST,
    );
    pub const SELF_MODIFICATION_FORBIDDEN: Self = Self::new(
        "self_modification_forbidden",
        "You cannot modify your own account through user management.",
        StatusCode::BAD_REQUEST,
    );
    pub const VALIDATION_ERROR: Self = Self::new(
        "validation_error",
        "Validation failed.",
        StatusCode::BAD_REQUEST,
    );

    // 401
    pub const EXPIRED_AUTH_TOKEN: Self = Self::new(
        "expired_auth_token",
        "Session expired.",
        StatusCode::UNAUTHORIZED,
    );
    pub const MALFORMED_AUTH_TOKEN: Self = Self::new(
        "malformed_auth_token",
        "Malformed auth token.",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_AUTH_TOKEN: Self = Self::new(
        "missing_auth_token",
        "Missing auth token.",
        StatusCode::UNAUTHORIZED,
    );
    pub const UNAUTHORIZED: Self = Self::new(
        "unauthorized",
        "Invalid credentials.",
        StatusCode::UNAUTHORIZED,
    );

    // 403
    pub const FORBIDDEN: Self = Self::new("forbidden", "Access denied.", StatusCode::FORBIDDEN);
    pub const INACTIVE_ACCOUNT: Self = Self::new(
        "inactive_account",
        "Account is inactive.",
        StatusCode::FORBIDDEN,
    );
    pub const INSUFFICIENT_PRIVILEGE: Self = Self::new(
        "insufficient_privilege",
        "Insufficient privilege.",
        StatusCode::FORBIDDEN,
    );
    pub const PRIVILEGE_ESCALATION: Self = Self::new(
        "privilege_escalation",
        "Role assignment not allowed.",
        StatusCode::FORBIDDEN,
    );

    // 404, 409
    pub const NOT_FOUND: Self =
        Self::new("not_found", "Resource not found.", StatusCode::NOT_FOUND);
    pub const CONFLICT: Self =
        Self::new("conflict", "Resource state conflict.", StatusCode::CONFLICT);

    // 500
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Internal server error.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'static str, message: &'static str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            suggestion: None,
            context: None,
            status,
        }
    }

    /// Sets the resource, merging with an existing one as `a/b`.
    pub fn with_resource(mut self, resource: impl Into<Cow<'static, str>>) -> Self {
        let new_resource = resource.into();
        self.resource = Some(match self.resource {
            Some(existing) => Cow::Owned(format!("{}/{}", existing, new_resource)),
            None => new_resource,
        });
        self
    }

    /// Appends a sentence to the preset message.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        let new_message = message.into();
        let base = self.message.trim_end_matches('.');
        self.message = Cow::Owned(format!("{}. {}", base, new_message));
        self
    }

    /// Attaches internal context, merging with existing context as `a; b`.
    pub fn with_context(mut self, context: impl Into<Cow<'static, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }

    /// Attaches a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<Cow<'static, str>>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl Default for ErrorResponse {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        tracing::warn!(
            target: TRACING_TARGET,
            status = %self.status,
            name = %self.name,
            message = %self.message,
            resource = ?self.resource,
            context = ?self.context,
            "HTTP error response"
        );
        (self.status, Json(self)).into_response()
    }
}
