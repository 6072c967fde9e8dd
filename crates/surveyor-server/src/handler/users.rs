//! User management handlers.
//!
//! Every mutation passes the acting principal and the target, both re-read
//! under the user store's write lock, to the authorization policy before any
//! change is applied.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use surveyor_policy::{Credentials, Section};

use super::request::{CreateUser, UpdateUser, UserPathParams};
use super::response::ManagedUser;
use crate::extract::{AuthState, Json, Path, ValidateJson};
use crate::handler::{ErrorKind, Result};
use crate::service::{PasswordHasher, ServiceState};
use crate::store::{NewUser, UserRepository, UserStore};

/// Tracing target for user management operations.
const TRACING_TARGET: &str = "surveyor_server::handler::users";

/// Lists every user with the caller's advisory edit and delete flags.
#[tracing::instrument(skip_all)]
async fn list_users(
    State(user_store): State<UserStore>,
    auth_state: AuthState,
) -> Result<(StatusCode, Json<Vec<ManagedUser>>)> {
    auth_state.authorize_section(Section::Users)?;

    let actor = auth_state.principal();
    let users: Vec<ManagedUser> = user_store
        .list_users()
        .await
        .into_iter()
        .map(|user| ManagedUser::from_model(&actor, user))
        .collect();

    tracing::debug!(
        target: TRACING_TARGET,
        actor_id = %actor.user_id,
        count = users.len(),
        "users listed"
    );

    Ok((StatusCode::OK, Json(users)))
}

/// Creates a user with the requested role.
#[tracing::instrument(skip_all)]
async fn create_user(
    State(user_store): State<UserStore>,
    State(password_hasher): State<PasswordHasher>,
    auth_state: AuthState,
    ValidateJson(request): ValidateJson<CreateUser>,
) -> Result<(StatusCode, Json<ManagedUser>)> {
    let actor = auth_state.principal();
    let role = request.role;
    let credentials = Credentials::new(request.email.trim(), &request.password);

    // Fail before hashing; the store repeats the check under its lock.
    actor.authorize_create(role, credentials)?;
    let password_hash = password_hasher.hash_password(&request.password)?;

    let new_user = NewUser {
        email: credentials.email.to_owned(),
        full_name: request.full_name.clone(),
        role,
        status: request.status,
        password_hash,
    };

    let user = user_store
        .create_user(actor.user_id, new_user, |actor| {
            actor.authorize_create(role, credentials)
        })
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        actor_id = %actor.user_id,
        user_id = %user.id,
        role = %user.role,
        "user created"
    );

    Ok((StatusCode::CREATED, Json(ManagedUser::from_model(&actor, user))))
}

/// Reads one user. Users without access to user management may read only
/// themselves.
#[tracing::instrument(skip_all)]
async fn get_user(
    State(user_store): State<UserStore>,
    auth_state: AuthState,
    Path(path): Path<UserPathParams>,
) -> Result<(StatusCode, Json<ManagedUser>)> {
    let actor = auth_state.principal();
    if actor.user_id != path.user_id {
        auth_state.authorize_section(Section::Users)?;
    }

    let Some(user) = user_store.find_user(path.user_id).await else {
        return Err(ErrorKind::NotFound
            .with_message("User not found")
            .with_context(format!("user id: {}", path.user_id))
            .with_resource("users"));
    };

    Ok((StatusCode::OK, Json(ManagedUser::from_model(&actor, user))))
}

/// Applies a partial update to another user.
#[tracing::instrument(skip_all)]
async fn update_user(
    State(user_store): State<UserStore>,
    auth_state: AuthState,
    Path(path): Path<UserPathParams>,
    ValidateJson(request): ValidateJson<UpdateUser>,
) -> Result<(StatusCode, Json<ManagedUser>)> {
    let actor = auth_state.principal();
    let changes = request.into_model();
    if changes.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_message("No changes were provided")
            .with_resource("users"));
    }

    let role_change = changes.role;
    let user = user_store
        .update_user(actor.user_id, path.user_id, changes, |actor, target| {
            actor.authorize_update(target, role_change)
        })
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        actor_id = %actor.user_id,
        user_id = %user.id,
        role = %user.role,
        status = %user.status,
        "user updated"
    );

    Ok((StatusCode::OK, Json(ManagedUser::from_model(&actor, user))))
}

/// Deletes another user.
#[tracing::instrument(skip_all)]
async fn delete_user(
    State(user_store): State<UserStore>,
    auth_state: AuthState,
    Path(path): Path<UserPathParams>,
) -> Result<StatusCode> {
    let actor = auth_state.principal();
    let user = user_store
        .delete_user(actor.user_id, path.user_id, |actor, target| {
            actor.authorize_delete(target)
        })
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        actor_id = %actor.user_id,
        user_id = %user.id,
        role = %user.role,
        "user deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{userId}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use jiff::SignedDuration;
    use serde_json::{Value, json};
    use surveyor_policy::{Role, UserStatus};

    use crate::extract::AuthClaims;
    use crate::handler::test::TestContext;
    use crate::service::AuthKeys;
    use crate::store::UserRepository;

    fn new_user(email: &str, role: &str) -> Value {
        json!({
            "email": email,
            "password": "secret1",
            "fullName": "New User",
            "role": role,
        })
    }

    #[tokio::test]
    async fn administrator_creates_researcher() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Administrator).await?;

        let response = context
            .server
            .post("/users")
            .authorization_bearer(&token)
            .json(&new_user("field@example.com", "researcher"))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["role"], "researcher");
        assert_eq!(body["status"], "active");
        assert_eq!(body["canEdit"], true);
        Ok(())
    }

    #[tokio::test]
    async fn administrator_cannot_create_superadmin() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Administrator).await?;

        let response = context
            .server
            .post("/users")
            .authorization_bearer(&token)
            .json(&new_user("boss@example.com", "superadmin"))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        let body: Value = response.json();
        assert_eq!(body["name"], "privilege_escalation");
        assert!(
            context
                .state
                .user_store
                .find_user_by_email("boss@example.com")
                .await
                .is_none()
        );
        Ok(())
    }

    #[tokio::test]
    async fn foreign_signed_superadmin_token_is_rejected() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (root, _) = context.sign_in(Role::Superadmin).await?;

        let foreign_keys = AuthKeys::from_secret(
            b"some-other-secret-with-at-least-32-bytes",
            SignedDuration::from_mins(60),
        );
        let forged = AuthClaims::new(root.id, foreign_keys.token_lifetime()).encode(&foreign_keys)?;

        let response = context
            .server
            .post("/users")
            .authorization_bearer(&forged)
            .json(&new_user("forged@example.com", "superadmin"))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(
            context
                .state
                .user_store
                .find_user_by_email("forged@example.com")
                .await
                .is_none()
        );
        Ok(())
    }

    #[tokio::test]
    async fn superadmin_creates_administrator() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Superadmin).await?;

        let response = context
            .server
            .post("/users")
            .authorization_bearer(&token)
            .json(&new_user("deputy@example.com", "administrator"))
            .await;
        response.assert_status(StatusCode::CREATED);
        Ok(())
    }

    #[tokio::test]
    async fn standard_role_cannot_create() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Coordinator).await?;

        let response = context
            .server
            .post("/users")
            .authorization_bearer(&token)
            .json(&new_user("field@example.com", "researcher"))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        let body: Value = response.json();
        assert_eq!(body["name"], "insufficient_privilege");
        Ok(())
    }

    #[tokio::test]
    async fn create_validates_credentials() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Administrator).await?;

        let response = context
            .server
            .post("/users")
            .authorization_bearer(&token)
            .json(&new_user("not-an-email", "analyst"))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["name"], "validation_error");
        assert_eq!(body["resource"], "email");

        let mut short_password = new_user("ok@example.com", "analyst");
        short_password["password"] = json!("12345");
        let response = context
            .server
            .post("/users")
            .authorization_bearer(&token)
            .json(&short_password)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["resource"], "password");
        Ok(())
    }

    #[tokio::test]
    async fn blank_full_name_is_rejected() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Administrator).await?;

        let mut blank_name = new_user("blank@example.com", "analyst");
        blank_name["fullName"] = json!("   ");
        let response = context
            .server
            .post("/users")
            .authorization_bearer(&token)
            .json(&blank_name)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["name"], "validation_error");

        let researcher = context
            .seed("r@example.com", Role::Researcher, UserStatus::Active)
            .await?;
        let response = context
            .server
            .patch(&format!("/users/{}", researcher.id))
            .authorization_bearer(&token)
            .json(&json!({ "fullName": " \t " }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let stored = context
            .state
            .user_store
            .find_user(researcher.id)
            .await
            .ok_or_else(|| anyhow::anyhow!("seeded user disappeared"))?;
        assert_eq!(stored.full_name, "Test User");
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (admin, token) = context.sign_in(Role::Administrator).await?;

        let response = context
            .server
            .post("/users")
            .authorization_bearer(&token)
            .json(&new_user(&admin.email.to_uppercase(), "analyst"))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        Ok(())
    }

    #[tokio::test]
    async fn administrator_cannot_edit_administrator() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Administrator).await?;
        let other = context
            .seed("peer@example.com", Role::Administrator, UserStatus::Active)
            .await?;

        let response = context
            .server
            .patch(&format!("/users/{}", other.id))
            .authorization_bearer(&token)
            .json(&json!({ "fullName": "Renamed" }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        let body: Value = response.json();
        assert_eq!(body["name"], "insufficient_privilege");
        Ok(())
    }

    #[tokio::test]
    async fn administrator_cannot_promote() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Administrator).await?;
        let researcher = context
            .seed("r@example.com", Role::Researcher, UserStatus::Active)
            .await?;

        let response = context
            .server
            .patch(&format!("/users/{}", researcher.id))
            .authorization_bearer(&token)
            .json(&json!({ "role": "administrator" }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        let body: Value = response.json();
        assert_eq!(body["name"], "privilege_escalation");

        let response = context
            .server
            .patch(&format!("/users/{}", researcher.id))
            .authorization_bearer(&token)
            .json(&json!({ "role": "coordinator", "status": "inactive" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["role"], "coordinator");
        assert_eq!(body["status"], "inactive");
        Ok(())
    }

    #[tokio::test]
    async fn self_edit_through_management_is_rejected() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (superadmin, token) = context.sign_in(Role::Superadmin).await?;

        let response = context
            .server
            .patch(&format!("/users/{}", superadmin.id))
            .authorization_bearer(&token)
            .json(&json!({ "role": "researcher" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["name"], "self_modification_forbidden");
        Ok(())
    }

    #[tokio::test]
    async fn empty_update_is_rejected() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Administrator).await?;
        let researcher = context
            .seed("r@example.com", Role::Researcher, UserStatus::Active)
            .await?;

        let response = context
            .server
            .patch(&format!("/users/{}", researcher.id))
            .authorization_bearer(&token)
            .json(&json!({}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn self_deletion_is_rejected() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (superadmin, token) = context.sign_in(Role::Superadmin).await?;

        let response = context
            .server
            .delete(&format!("/users/{}", superadmin.id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["name"], "self_deletion_forbidden");
        assert!(context.state.user_store.find_user(superadmin.id).await.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn superadmin_deletes_administrator() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Superadmin).await?;
        let admin = context
            .seed("admin2@example.com", Role::Administrator, UserStatus::Active)
            .await?;

        let response = context
            .server
            .delete(&format!("/users/{}", admin.id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = context
            .server
            .get(&format!("/users/{}", admin.id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn downgrade_takes_effect_on_next_request() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (admin, token) = context.sign_in(Role::Administrator).await?;
        let researcher = context
            .seed("r@example.com", Role::Researcher, UserStatus::Active)
            .await?;

        context.set_role(admin.id, Role::Analyst).await?;

        let response = context
            .server
            .delete(&format!("/users/{}", researcher.id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert!(context.state.user_store.find_user(researcher.id).await.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn listing_requires_user_management() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Coordinator).await?;

        let response = context
            .server
            .get("/users")
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        Ok(())
    }

    #[tokio::test]
    async fn listing_carries_advisory_flags() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (admin, token) = context.sign_in(Role::Administrator).await?;
        let peer = context
            .seed("peer@example.com", Role::Administrator, UserStatus::Active)
            .await?;
        let analyst = context
            .seed("a@example.com", Role::Analyst, UserStatus::Active)
            .await?;

        let response = context
            .server
            .get("/users")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();

        let body: Vec<Value> = response.json();
        assert_eq!(body.len(), 3);

        let flags = |id: uuid::Uuid| {
            body.iter()
                .find(|user| user["userId"] == id.to_string())
                .map(|user| (user["canEdit"].clone(), user["canDelete"].clone()))
        };
        assert_eq!(flags(admin.id), Some((json!(false), json!(false))));
        assert_eq!(flags(peer.id), Some((json!(false), json!(false))));
        assert_eq!(flags(analyst.id), Some((json!(true), json!(true))));
        Ok(())
    }

    #[tokio::test]
    async fn standard_user_reads_only_self() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (analyst, token) = context.sign_in(Role::Analyst).await?;
        let other = context
            .seed("r@example.com", Role::Researcher, UserStatus::Active)
            .await?;

        let response = context
            .server
            .get(&format!("/users/{}", analyst.id))
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();

        let response = context
            .server
            .get(&format!("/users/{}", other.id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_user_id_is_bad_request() -> anyhow::Result<()> {
        let context = TestContext::new().await?;
        let (_, token) = context.sign_in(Role::Superadmin).await?;

        let response = context
            .server
            .get("/users/not-a-uuid")
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }
}
