//! Token signing keys and password hashing.

mod auth_keys;
mod password_hasher;

pub use auth_keys::AuthKeys;
pub use password_hasher::PasswordHasher;
