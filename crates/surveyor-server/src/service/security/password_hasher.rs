//! Password hashing and verification using Argon2id.
//!
//! Methods return HTTP errors directly since they are only called from
//! handlers and start-up seeding.

use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};

use crate::handler::{ErrorKind, Result};

/// Tracing target for password hashing.
const TRACING_TARGET: &str = "surveyor_server::service::password_hasher";

/// Number of random bytes in a generated salt.
const SALT_LENGTH: usize = 16;

/// Argon2id password hashing service.
///
/// Uses the OWASP-recommended default parameters (19 MiB, two passes).
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a new [`PasswordHasher`] with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hasher with custom Argon2id cost parameters.
    ///
    /// Returns `None` when the parameters are outside Argon2's accepted range.
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Option<Self> {
        let params = argon2::Params::new(m_cost, t_cost, p_cost, None).ok()?;
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Some(Self { argon2 })
    }

    fn generate_salt() -> Result<SaltString> {
        let mut salt_bytes = [0u8; SALT_LENGTH];
        getrandom::getrandom(&mut salt_bytes).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to gather entropy for password salt"
            );

            ErrorKind::InternalServerError
                .with_message("Password processing failed")
                .with_context("Salt generation error")
                .with_resource("authentication")
        })?;

        SaltString::encode_b64(&salt_bytes).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to encode password salt"
            );

            ErrorKind::InternalServerError
                .with_message("Password processing failed")
                .with_context("Salt encoding error")
                .with_resource("authentication")
        })
    }

    /// Hashes a password into a PHC string with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = Self::generate_salt()?;

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing operation failed"
                );

                ErrorKind::InternalServerError
                    .with_message("Password processing failed")
                    .with_context("Hash generation error")
                    .with_resource("authentication")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored PHC hash.
    ///
    /// A wrong password yields [`ErrorKind::Unauthorized`].
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %e,
                "invalid password hash format in user store"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication temporarily unavailable")
                .with_context("Hash format error")
                .with_resource("authentication")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(()),
            Err(ArgonError::Password) => Err(ErrorKind::Unauthorized
                .with_message("Invalid email or password")
                .with_resource("authentication")),
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password verification system error"
                );

                Err(ErrorKind::InternalServerError
                    .with_message("Authentication temporarily unavailable")
                    .with_context("Verification error")
                    .with_resource("authentication"))
            }
        }
    }

    /// Spends roughly the time of a real verification without a stored hash.
    ///
    /// Called for unknown e-mails so response timing does not reveal which
    /// accounts exist.
    pub fn verify_dummy_password(&self, password: &str) {
        let _ = self.hash_password(password);
    }
}
