//! User directory error to HTTP error conversion.

use super::http_error::{Error, ErrorKind};
use crate::store::StoreError;

impl From<StoreError> for Error {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UserNotFound(user_id) => ErrorKind::NotFound
                .with_message("User not found")
                .with_context(format!("user id: {user_id}"))
                .with_resource("users"),
            StoreError::InactivePrincipal(user_id) => ErrorKind::InactiveAccount
                .with_context(format!("user id: {user_id}"))
                .with_resource("authentication"),
            StoreError::EmailTaken => ErrorKind::Conflict
                .with_message("Email address is already registered")
                .with_resource("email"),
            StoreError::Denied(error) => error.into(),
        }
    }
}
