use jiff::Timestamp;
use serde::Serialize;

use super::User;

/// Successful sign-in.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Timestamp when the token stops being accepted.
    pub expires_at: Timestamp,
    /// The signed-in user.
    pub user: User,
}
