//! Authenticated principal resolved against the user store.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;
use surveyor_policy::{Principal, Section};

use super::AuthHeader;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::AuthKeys;
use crate::store::{UserRecord, UserRepository, UserStore};
use crate::{TRACING_TARGET_AUTHENTICATION, TRACING_TARGET_AUTHORIZATION};

/// The acting user, as currently stored.
///
/// Extraction verifies the bearer token and then re-reads the user, so the
/// role seen by handlers is never older than the request. Unknown users are
/// rejected with [`ErrorKind::Unauthorized`] and deactivated users with
/// [`ErrorKind::InactiveAccount`].
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(pub UserRecord);

impl AuthState {
    /// Returns the acting principal.
    #[inline]
    pub const fn principal(&self) -> Principal {
        self.0.principal()
    }

    /// Fails with [`ErrorKind::Forbidden`] unless the user may open `section`.
    pub fn authorize_section(&self, section: Section) -> Result<()> {
        if section.is_visible_to(self.role) {
            return Ok(());
        }

        tracing::warn!(
            target: TRACING_TARGET_AUTHORIZATION,
            user_id = %self.id,
            role = %self.role,
            section = %section,
            "section access denied"
        );

        Err(ErrorKind::Forbidden
            .with_message(format!("The {} role cannot access {}", self.role, section.path()))
            .with_resource(section.to_string()))
    }

    async fn from_auth_header(auth_header: AuthHeader, user_store: &UserStore) -> Result<Self> {
        let claims = auth_header.into_auth_claims();

        let Some(user) = user_store.find_user(claims.user_id).await else {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                user_id = %claims.user_id,
                token_id = %claims.token_id,
                "token subject no longer exists"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Authentication session is invalid")
                .with_resource("authentication"));
        };

        if !user.is_active() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                user_id = %user.id,
                "inactive user presented a valid token"
            );
            return Err(ErrorKind::InactiveAccount.with_resource("authentication"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            user_id = %user.id,
            role = %user.role,
            "request authenticated"
        );

        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send,
    AuthKeys: FromRef<S>,
    UserStore: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let auth_header = AuthHeader::from_request_parts(parts, state).await?;
        let user_store = UserStore::from_ref(state);
        let auth_state = Self::from_auth_header(auth_header, &user_store).await?;

        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}
