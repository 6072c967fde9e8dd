//! User directory errors.

use surveyor_policy::AuthError;
use uuid::Uuid;

/// Result type alias for user directory operations.
pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;

/// Reason a user directory operation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No user exists with the given identifier.
    #[error("user {0} not found")]
    UserNotFound(Uuid),

    /// The acting user exists but has been deactivated.
    #[error("user {0} is inactive")]
    InactivePrincipal(Uuid),

    /// Another user already holds the e-mail address.
    #[error("email address is already registered")]
    EmailTaken,

    /// The authorization check rejected the operation.
    #[error(transparent)]
    Denied(#[from] AuthError),
}
