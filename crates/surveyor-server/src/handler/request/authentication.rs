use serde::Deserialize;
use validator::Validate;

/// Request payload for signing in.
#[must_use]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    /// Login e-mail.
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}
