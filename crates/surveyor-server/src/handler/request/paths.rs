use serde::Deserialize;
use uuid::Uuid;

/// Path parameters of `/users/{userId}`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPathParams {
    /// Target user.
    pub user_id: Uuid,
}
