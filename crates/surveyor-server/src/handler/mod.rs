//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust
//! use surveyor_server::handler::routes;
//! use surveyor_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::with_auth_secret(std::env::var("AUTH_SECRET")?);
//! let state = ServiceState::from_config(&config).await?;
//! let app: axum::Router = routes().with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod authentication;
mod error;
mod profile;
mod request;
mod response;
mod users;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub(crate) use crate::handler::response::ErrorResponse;
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes.
///
/// Authentication is enforced per handler by the [`AuthState`] extractor, so
/// only `/auth/login` is reachable without a token.
///
/// [`AuthState`]: crate::extract::AuthState
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(authentication::routes())
        .merge(profile::routes())
        .merge(users::routes())
        .fallback(handler)
}

#[cfg(test)]
pub(crate) mod test {
    use axum_test::TestServer;
    use jiff::SignedDuration;
    use surveyor_policy::{Role, UserStatus};
    use uuid::Uuid;

    use crate::extract::AuthClaims;
    use crate::handler::routes;
    use crate::service::{AuthKeys, PasswordHasher, ServiceState};
    use crate::store::{NewUser, UpdateUser, UserRecord, UserRepository, UserStore};

    /// Running test server together with the state behind it.
    pub struct TestContext {
        pub server: TestServer,
        pub state: ServiceState,
    }

    impl TestContext {
        /// Password of every seeded user.
        pub const PASSWORD: &str = "secret123";

        /// Returns a new [`TestContext`] with an empty user store.
        pub async fn new() -> anyhow::Result<Self> {
            let auth_keys = AuthKeys::from_secret(
                b"test-secret-with-at-least-32-bytes",
                SignedDuration::from_mins(60),
            );
            let password_hasher = PasswordHasher::with_params(8, 1, 1)
                .ok_or_else(|| anyhow::anyhow!("invalid argon2 parameters"))?;
            let state = ServiceState::from_parts(UserStore::new(), auth_keys, password_hasher);

            let server = TestServer::new(routes().with_state(state.clone()))?;
            Ok(Self { server, state })
        }

        /// Inserts a user with [`Self::PASSWORD`].
        pub async fn seed(
            &self,
            email: &str,
            role: Role,
            status: UserStatus,
        ) -> anyhow::Result<UserRecord> {
            let password_hash = self.state.password_hasher.hash_password(Self::PASSWORD)?;
            let new_user = NewUser {
                email: email.to_owned(),
                full_name: "Test User".to_owned(),
                role,
                status,
                password_hash,
            };

            Ok(self.state.user_store.insert_user(new_user).await?)
        }

        /// Seeds an active user with `role` and issues a token for them.
        pub async fn sign_in(&self, role: Role) -> anyhow::Result<(UserRecord, String)> {
            let email = format!("{}@example.com", Uuid::new_v4().simple());
            let user = self.seed(&email, role, UserStatus::Active).await?;

            let auth_keys = &self.state.auth_keys;
            let token = AuthClaims::new(user.id, auth_keys.token_lifetime()).encode(auth_keys)?;
            Ok((user, token))
        }

        /// Changes a user's status behind the API's back.
        pub async fn set_status(&self, user_id: Uuid, status: UserStatus) -> anyhow::Result<()> {
            let changes = UpdateUser {
                status: Some(status),
                ..UpdateUser::default()
            };
            self.force_update(user_id, changes).await
        }

        /// Changes a user's role behind the API's back.
        pub async fn set_role(&self, user_id: Uuid, role: Role) -> anyhow::Result<()> {
            let changes = UpdateUser {
                role: Some(role),
                ..UpdateUser::default()
            };
            self.force_update(user_id, changes).await
        }

        async fn force_update(&self, user_id: Uuid, changes: UpdateUser) -> anyhow::Result<()> {
            let email = format!("root-{}@example.com", Uuid::new_v4().simple());
            let root = self
                .seed(&email, Role::Superadmin, UserStatus::Active)
                .await?;

            self.state
                .user_store
                .update_user(root.id, user_id, changes, |_, _| Ok(()))
                .await?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> anyhow::Result<()> {
        let context = TestContext::new().await?;

        let response = context.server.get("/nowhere").await;
        response.assert_status_not_found();

        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "not_found");
        Ok(())
    }
}
