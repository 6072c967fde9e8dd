//! Access token claims.

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::AuthKeys;

/// Claims carried by an access token.
///
/// Tokens carry identity only. The holder's role and status are read from the
/// user store on every request, so a token issued before a downgrade grants
/// nothing beyond the downgraded role.
///
/// | Claim | Field | Description |
/// |-------|-------|-------------|
/// | `iss` | `issued_by` | Token issuer identifier |
/// | `aud` | `audience` | Token audience identifier |
/// | `jti` | `token_id` | Unique token identifier |
/// | `sub` | `user_id` | User this token represents |
/// | `iat` | `issued_at` | Issue time, seconds since the Unix epoch |
/// | `exp` | `expires_at` | Expiry time, seconds since the Unix epoch |
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthClaims {
    #[serde(rename = "iss")]
    issued_by: String,
    #[serde(rename = "aud")]
    audience: String,

    /// Unique token identifier.
    #[serde(rename = "jti")]
    pub token_id: Uuid,
    /// User this token represents.
    #[serde(rename = "sub")]
    pub user_id: Uuid,

    /// Issue time in seconds since the Unix epoch.
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiry time in seconds since the Unix epoch.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl AuthClaims {
    /// Audience of every issued token.
    pub const JWT_AUDIENCE: &str = "surveyor:server";
    /// Issuer of every issued token.
    pub const JWT_ISSUER: &str = "surveyor";

    /// Creates claims for `user_id` valid for `lifetime` from now.
    pub fn new(user_id: Uuid, lifetime: SignedDuration) -> Self {
        let issued_at = Timestamp::now().as_second();

        Self {
            issued_by: Self::JWT_ISSUER.to_owned(),
            audience: Self::JWT_AUDIENCE.to_owned(),
            token_id: Uuid::new_v4(),
            user_id,
            issued_at,
            expires_at: issued_at.saturating_add(lifetime.as_secs()),
        }
    }

    /// Returns the expiry time as a timestamp.
    pub fn expires_at(&self) -> Timestamp {
        Timestamp::from_second(self.expires_at).unwrap_or(Timestamp::MAX)
    }

    /// Returns whether the token has expired.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now().as_second()
    }

    /// Signs the claims into a compact JWT.
    pub fn encode(&self, auth_keys: &AuthKeys) -> Result<String> {
        let header = Header::new(AuthKeys::ALGORITHM);
        encode(&header, self, auth_keys.encoding_key()).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                user_id = %self.user_id,
                "failed to encode access token"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication token generation failed")
                .with_resource("authentication")
        })
    }

    /// Verifies a compact JWT and returns its claims.
    pub fn decode(token: &str, auth_keys: &AuthKeys) -> Result<Self> {
        let mut validation = Validation::new(AuthKeys::ALGORITHM);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.set_audience(&[Self::JWT_AUDIENCE]);
        validation.set_issuer(&[Self::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "jti", "sub", "iat", "exp"]);

        let claims = decode::<Self>(token, auth_keys.decoding_key(), &validation)?.claims;

        if claims.is_expired() {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                token_id = %claims.token_id,
                user_id = %claims.user_id,
                "access token expired within validation leeway"
            );
            return Err(ErrorKind::ExpiredAuthToken.with_resource("authentication"));
        }

        Ok(claims)
    }
}

impl From<JwtError> for Error {
    fn from(error: JwtError) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            error = %error,
            "access token rejected"
        );

        let error = match error.kind() {
            JwtErrorKind::ExpiredSignature => ErrorKind::ExpiredAuthToken
                .with_message("Please sign in again to continue"),
            JwtErrorKind::InvalidSignature
            | JwtErrorKind::InvalidAudience
            | JwtErrorKind::InvalidIssuer => ErrorKind::Unauthorized
                .with_message("Authentication token verification failed"),
            JwtErrorKind::MissingRequiredClaim(claim) => ErrorKind::MalformedAuthToken
                .with_context(format!("token is missing required claim: {claim}")),
            JwtErrorKind::InvalidToken
            | JwtErrorKind::InvalidAlgorithm
            | JwtErrorKind::Base64(_)
            | JwtErrorKind::Json(_)
            | JwtErrorKind::Utf8(_) => ErrorKind::MalformedAuthToken.into_error(),
            _ => ErrorKind::InternalServerError
                .with_message("Authentication processing failed")
                .with_context(error.to_string()),
        };

        error.with_resource("authentication")
    }
}
