#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default values for configuration options.
mod defaults {
    /// Default access token lifetime in minutes.
    pub const TOKEN_LIFETIME_MINUTES: u32 = 60;

    /// Default display name of the bootstrap superadmin.
    pub const BOOTSTRAP_NAME: &str = "Superadmin";
}

/// Minimum accepted length of the token signing secret, in bytes.
pub const MIN_AUTH_SECRET_LENGTH: usize = 32;

/// Maximum accepted access token lifetime in minutes (one week).
pub const MAX_TOKEN_LIFETIME_MINUTES: u32 = 7 * 24 * 60;

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Secret used to sign and verify HS256 access tokens.
    ///
    /// Has no default: every deployment must supply its own.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "AUTH_SECRET", hide_env_values = true)
    )]
    pub auth_secret: String,

    /// Lifetime of issued access tokens in minutes.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "TOKEN_LIFETIME_MINUTES", default_value_t = defaults::TOKEN_LIFETIME_MINUTES)
    )]
    pub token_lifetime_minutes: u32,

    /// E-mail of the superadmin seeded at start-up.
    #[cfg_attr(feature = "config", arg(long, env = "BOOTSTRAP_EMAIL"))]
    pub bootstrap_email: Option<String>,

    /// Password of the superadmin seeded at start-up.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "BOOTSTRAP_PASSWORD", hide_env_values = true)
    )]
    pub bootstrap_password: Option<String>,

    /// Display name of the superadmin seeded at start-up.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "BOOTSTRAP_NAME", default_value = defaults::BOOTSTRAP_NAME)
    )]
    pub bootstrap_name: String,
}

impl ServiceConfig {
    /// Creates a configuration with the given signing secret and defaults elsewhere.
    pub fn with_auth_secret(auth_secret: impl Into<String>) -> Self {
        Self {
            auth_secret: auth_secret.into(),
            token_lifetime_minutes: defaults::TOKEN_LIFETIME_MINUTES,
            bootstrap_email: None,
            bootstrap_password: None,
            bootstrap_name: defaults::BOOTSTRAP_NAME.to_owned(),
        }
    }

    /// Sets the superadmin seeded at start-up.
    pub fn with_bootstrap(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.bootstrap_email = Some(email.into());
        self.bootstrap_password = Some(password.into());
        self
    }

    /// Returns the access token lifetime.
    #[inline]
    pub fn token_lifetime(&self) -> jiff::SignedDuration {
        jiff::SignedDuration::from_mins(i64::from(self.token_lifetime_minutes))
    }

    /// Returns the bootstrap superadmin credentials when both are configured.
    pub fn bootstrap_credentials(&self) -> Option<(&str, &str)> {
        match (&self.bootstrap_email, &self.bootstrap_password) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.auth_secret.len() < MIN_AUTH_SECRET_LENGTH {
            return Err(Error::config(format!(
                "auth secret must be at least {MIN_AUTH_SECRET_LENGTH} bytes"
            )));
        }

        if self.token_lifetime_minutes == 0 {
            return Err(Error::config("token lifetime must be greater than 0"));
        }

        if self.token_lifetime_minutes > MAX_TOKEN_LIFETIME_MINUTES {
            return Err(Error::config(format!(
                "token lifetime cannot exceed {MAX_TOKEN_LIFETIME_MINUTES} minutes"
            )));
        }

        match (&self.bootstrap_email, &self.bootstrap_password) {
            (Some(_), None) | (None, Some(_)) => Err(Error::config(
                "bootstrap email and password must be set together",
            )),
            (Some(email), Some(password)) => {
                surveyor_policy::validate_email(email.trim())
                    .and_then(|()| surveyor_policy::validate_password(password))
                    .map_err(|e| Error::config("invalid bootstrap credentials").with_source(e))
            }
            (None, None) => Ok(()),
        }
    }
}
