//! Application state and dependency injection.

mod config;
mod security;

use surveyor_policy::{Credentials, Role, UserStatus};

pub use crate::service::config::{
    MAX_TOKEN_LIFETIME_MINUTES, MIN_AUTH_SECRET_LENGTH, ServiceConfig,
};
pub use crate::service::security::{AuthKeys, PasswordHasher};
use crate::store::{NewUser, UserRepository, UserStore};
pub use crate::{Error, Result};

/// Tracing target for application state initialization.
const TRACING_TARGET: &str = "surveyor_server::service";

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub user_store: UserStore,
    pub auth_keys: AuthKeys,
    pub password_hasher: PasswordHasher,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Validates the configuration and seeds the bootstrap superadmin when
    /// one is configured.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let state = Self::from_parts(
            UserStore::new(),
            AuthKeys::from_config(config),
            PasswordHasher::new(),
        );

        if let Some((email, password)) = config.bootstrap_credentials() {
            state
                .seed_user(email, password, &config.bootstrap_name, Role::Superadmin)
                .await?;
        }

        Ok(state)
    }

    /// Assembles state from already constructed services.
    pub fn from_parts(
        user_store: UserStore,
        auth_keys: AuthKeys,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            user_store,
            auth_keys,
            password_hasher,
        }
    }

    /// Inserts an active user without an acting principal.
    ///
    /// Only meant for start-up seeding and tests; request handlers go through
    /// the guarded store operations instead.
    pub async fn seed_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<crate::store::UserRecord> {
        surveyor_policy::validate_credentials(Credentials::new(email.trim(), password))
            .map_err(|e| Error::config("invalid seed user credentials").with_source(e))?;

        let password_hash = self
            .password_hasher
            .hash_password(password)
            .map_err(|e| Error::auth("failed to hash seed user password").with_source(e))?;

        let new_user = NewUser {
            email: email.to_owned(),
            full_name: full_name.to_owned(),
            role,
            status: UserStatus::Active,
            password_hash,
        };

        let record = self.user_store.insert_user(new_user).await?;

        tracing::info!(
            target: TRACING_TARGET,
            user_id = %record.id,
            role = %record.role,
            "seeded user"
        );

        Ok(record)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(user_store: UserStore);
impl_di!(auth_keys: AuthKeys);
impl_di!(password_hasher: PasswordHasher);
