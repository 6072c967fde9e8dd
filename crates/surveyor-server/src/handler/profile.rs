//! Self-service profile handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;

use super::request::UpdateProfile;
use super::response::Profile;
use crate::extract::{AuthState, Json, ValidateJson};
use crate::handler::Result;
use crate::service::ServiceState;
use crate::store::{UserRepository, UserStore};

/// Tracing target for profile operations.
const TRACING_TARGET: &str = "surveyor_server::handler::profile";

/// Returns the current user with the sections and roles available to them.
#[tracing::instrument(skip_all)]
async fn get_profile(AuthState(user): AuthState) -> Result<(StatusCode, Json<Profile>)> {
    tracing::trace!(target: TRACING_TARGET, user_id = %user.id, "reading profile");
    Ok((StatusCode::OK, Json(Profile::from_model(user))))
}

/// Changes the current user's display name.
#[tracing::instrument(skip_all)]
async fn update_profile(
    State(user_store): State<UserStore>,
    AuthState(user): AuthState,
    ValidateJson(request): ValidateJson<UpdateProfile>,
) -> Result<(StatusCode, Json<Profile>)> {
    let user = user_store
        .update_profile(user.id, request.full_name)
        .await?;

    tracing::info!(target: TRACING_TARGET, user_id = %user.id, "profile updated");

    Ok((StatusCode::OK, Json(Profile::from_model(user))))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/me", get(get_profile).patch(update_profile))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use surveyor_policy::{Role, UserStatus};

    use crate::handler::test::TestContext;

    #[tokio::test]
    async fn profile_lists_permissions() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Administrator).await?;

        let response = context.server.get("/me").authorization_bearer(&token).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["role"], "administrator");
        assert_eq!(body["canManageUsers"], true);
        assert_eq!(
            body["assignableRoles"],
            json!(["researcher", "analyst", "coordinator"])
        );
        assert_eq!(body["sections"].as_array().map(Vec::len), Some(6));
        Ok(())
    }

    #[tokio::test]
    async fn coordinator_profile_is_restricted() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Coordinator).await?;

        let body: Value = context
            .server
            .get("/me")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(body["canManageUsers"], false);
        assert_eq!(body["assignableRoles"], json!([]));
        Ok(())
    }

    #[tokio::test]
    async fn rename_self() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Researcher).await?;

        let response = context
            .server
            .patch("/me")
            .authorization_bearer(&token)
            .json(&json!({ "fullName": "  Maria Souza " }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["fullName"], "Maria Souza");
        assert_eq!(body["role"], "researcher");
        Ok(())
    }

    #[tokio::test]
    async fn blank_rename_is_rejected() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Researcher).await?;

        let response = context
            .server
            .patch("/me")
            .authorization_bearer(&token)
            .json(&json!({ "fullName": "   " }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["name"], "validation_error");
        Ok(())
    }

    #[tokio::test]
    async fn profile_cannot_change_role() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Researcher).await?;

        let response = context
            .server
            .patch("/me")
            .authorization_bearer(&token)
            .json(&json!({ "fullName": "Maria", "role": "superadmin" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() -> anyhow::Result<()> {
        let context = TestContext::new().await?;

        let response = context.server.get("/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: Value = response.json();
        assert_eq!(body["name"], "missing_auth_token");

        let response = context
            .server
            .get("/me")
            .authorization_bearer("garbage")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn deactivated_user_token_stops_working() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (user, token) = context.sign_in(Role::Analyst).await?;
        context.set_status(user.id, UserStatus::Inactive).await?;

        let response = context.server.get("/me").authorization_bearer(&token).await;
        response.assert_status(StatusCode::FORBIDDEN);
        Ok(())
    }
}
