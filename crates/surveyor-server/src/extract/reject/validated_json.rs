//! JSON extractor that also runs `validator` rules.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// Tracing target for request validation.
const TRACING_TARGET: &str = "surveyor_server::extract::validate";

/// JSON extractor that validates the body after deserialization.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Returns the wrapped value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self(data))
    }
}

fn format_validation_error(field: &str, error: &validator::ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return format!("Field '{}': {}", field, custom_message);
    }

    let bound = |key: &str| error.params.get(key).and_then(serde_json::Value::as_u64);

    let message = match (error.code.as_ref(), bound("min"), bound("max")) {
        ("required", ..) => "is required and cannot be empty".to_owned(),
        ("length", Some(min), Some(max)) => {
            format!("must be between {min} and {max} characters long")
        }
        ("length", Some(min), None) => format!("must be at least {min} characters long"),
        ("length", None, Some(max)) => format!("must be at most {max} characters long"),
        ("length", None, None) => "has invalid length".to_owned(),
        (code, ..) => format!("failed validation: {code}"),
    };

    format!("Field '{}' {}", field, message)
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        let mut error_messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();
        error_messages.sort();

        let user_message = match error_messages.as_slice() {
            [] => "Validation failed".to_owned(),
            [single_error] => single_error.clone(),
            multiple => multiple.join(". "),
        };

        tracing::debug!(
            target: TRACING_TARGET,
            errors = ?errors.field_errors(),
            "request validation failed"
        );

        ErrorKind::ValidationError
            .with_message(user_message)
            .with_resource("request")
    }
}
