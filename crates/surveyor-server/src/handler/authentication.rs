//! Sign-in handler.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;

use super::request::Login;
use super::response::{LoginResponse, User};
use crate::extract::{AuthClaims, Json, ValidateJson};
use crate::handler::{ErrorKind, Result};
use crate::service::{AuthKeys, PasswordHasher, ServiceState};
use crate::store::{UserRepository, UserStore};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "surveyor_server::handler::authentication";

/// Exchanges e-mail and password for an access token.
#[tracing::instrument(skip_all)]
async fn login(
    State(user_store): State<UserStore>,
    State(password_hasher): State<PasswordHasher>,
    State(auth_keys): State<AuthKeys>,
    ValidateJson(request): ValidateJson<Login>,
) -> Result<(StatusCode, Json<LoginResponse>)> {
    let Some(user) = user_store.find_user_by_email(&request.email).await else {
        password_hasher.verify_dummy_password(&request.password);

        tracing::warn!(target: TRACING_TARGET, "login failed: unknown email");
        return Err(ErrorKind::Unauthorized
            .with_message("Invalid email or password")
            .with_resource("authentication"));
    };

    password_hasher
        .verify_password(&request.password, &user.password_hash)
        .inspect_err(|_| {
            tracing::warn!(
                target: TRACING_TARGET,
                user_id = %user.id,
                "login failed: wrong password"
            );
        })?;

    if !user.is_active() {
        tracing::warn!(
            target: TRACING_TARGET,
            user_id = %user.id,
            "login failed: account inactive"
        );
        return Err(ErrorKind::InactiveAccount.with_resource("authentication"));
    }

    let claims = AuthClaims::new(user.id, auth_keys.token_lifetime());
    let access_token = claims.encode(&auth_keys)?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        role = %user.role,
        token_id = %claims.token_id,
        "user logged in"
    );

    let response = LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_at: claims.expires_at(),
        user: User::from_model(user),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/auth/login", post(login))
}
