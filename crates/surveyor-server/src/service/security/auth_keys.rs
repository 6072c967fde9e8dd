//! HMAC keys for access token signing and verification.

use std::fmt;
use std::sync::Arc;

use jiff::SignedDuration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::service::ServiceConfig;

/// Shared HS256 keys plus the lifetime applied to issued tokens.
///
/// Cloning is cheap; the keys are reference counted.
#[derive(Clone)]
pub struct AuthKeys {
    inner: Arc<AuthKeysInner>,
}

struct AuthKeysInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_lifetime: SignedDuration,
}

impl AuthKeys {
    /// Signing algorithm for every issued token.
    pub const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Creates keys from a shared secret.
    pub fn from_secret(secret: &[u8], token_lifetime: SignedDuration) -> Self {
        let inner = AuthKeysInner {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_lifetime,
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Creates keys from the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::from_secret(config.auth_secret.as_bytes(), config.token_lifetime())
    }

    /// Returns the key used to sign tokens.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Returns the key used to verify tokens.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns the lifetime of issued tokens.
    #[inline]
    pub fn token_lifetime(&self) -> SignedDuration {
        self.inner.token_lifetime
    }
}

impl fmt::Debug for AuthKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthKeys")
            .field("algorithm", &Self::ALGORITHM)
            .field("token_lifetime", &self.inner.token_lifetime)
            .finish_non_exhaustive()
    }
}
