//! Bearer token extraction.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;

use super::AuthClaims;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::AuthKeys;

/// Verified claims of the request's `Authorization: Bearer` token.
///
/// Only the token is checked here. Use [`AuthState`] to also resolve the
/// holder against the user store.
///
/// [`AuthState`]: crate::extract::AuthState
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeader(AuthClaims);

impl AuthHeader {
    /// Returns a reference to the token claims.
    #[inline]
    pub const fn as_auth_claims(&self) -> &AuthClaims {
        &self.0
    }

    /// Consumes this header and returns the token claims.
    #[inline]
    pub fn into_auth_claims(self) -> AuthClaims {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Sync + Send,
    AuthKeys: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.extensions.get::<Self>() {
            return Ok(auth_header.clone());
        }

        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;

        let bearer_header = AuthBearerHeader::from_request_parts(parts, state)
            .await
            .map_err(|rejection| match rejection.reason() {
                TypedHeaderRejectionReason::Missing => ErrorKind::MissingAuthToken
                    .with_message("Authentication required")
                    .with_resource("authentication"),
                TypedHeaderRejectionReason::Error(_) => ErrorKind::MalformedAuthToken
                    .with_message("Authorization header must contain a Bearer token")
                    .with_resource("authentication"),
                _ => ErrorKind::InternalServerError
                    .with_message("Authentication processing failed")
                    .with_resource("authentication"),
            })?;

        let auth_keys = AuthKeys::from_ref(state);
        let auth_header = Self(AuthClaims::decode(bearer_header.token(), &auth_keys)?);

        parts.extensions.insert(auth_header.clone());
        Ok(auth_header)
    }
}
