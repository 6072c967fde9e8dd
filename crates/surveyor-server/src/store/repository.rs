//! User repository and its in-memory implementation.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use jiff::Timestamp;
use surveyor_policy::Principal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{NewUser, StoreError, StoreResult, TRACING_TARGET, UpdateUser, UserRecord};

/// Repository for user directory operations.
///
/// Guarded operations take an `authorize` closure that receives principals
/// read under the same write lock that performs the mutation. The closure's
/// error aborts the operation and is returned as [`StoreError::Denied`].
pub trait UserRepository {
    /// Finds a user by identifier.
    fn find_user(&self, user_id: Uuid) -> impl Future<Output = Option<UserRecord>> + Send;

    /// Finds a user by e-mail. Comparison is case-insensitive.
    fn find_user_by_email(&self, email: &str)
    -> impl Future<Output = Option<UserRecord>> + Send;

    /// Lists every user, most recently created first.
    fn list_users(&self) -> impl Future<Output = Vec<UserRecord>> + Send;

    /// Inserts a user without any authorization check.
    ///
    /// Reserved for start-up seeding.
    fn insert_user(&self, new_user: NewUser)
    -> impl Future<Output = StoreResult<UserRecord>> + Send;

    /// Creates a user on behalf of `actor_id`.
    fn create_user<F>(
        &self,
        actor_id: Uuid,
        new_user: NewUser,
        authorize: F,
    ) -> impl Future<Output = StoreResult<UserRecord>> + Send
    where
        F: FnOnce(&Principal) -> surveyor_policy::Result + Send;

    /// Applies `changes` to `target_id` on behalf of `actor_id`.
    ///
    /// The closure receives the actor and the target as currently stored.
    fn update_user<F>(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        changes: UpdateUser,
        authorize: F,
    ) -> impl Future<Output = StoreResult<UserRecord>> + Send
    where
        F: FnOnce(&Principal, &Principal) -> surveyor_policy::Result + Send;

    /// Changes the display name of an active user's own account.
    fn update_profile(
        &self,
        user_id: Uuid,
        full_name: String,
    ) -> impl Future<Output = StoreResult<UserRecord>> + Send;

    /// Removes `target_id` on behalf of `actor_id`, returning the removed record.
    fn delete_user<F>(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        authorize: F,
    ) -> impl Future<Output = StoreResult<UserRecord>> + Send
    where
        F: FnOnce(&Principal, &Principal) -> surveyor_policy::Result + Send;
}

/// Shared handle to the in-memory user directory.
///
/// Cloning is cheap; all clones observe the same table.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<UserTable>>,
}

impl UserStore {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Default)]
struct UserTable {
    users: HashMap<Uuid, UserRecord>,
    emails: HashMap<String, Uuid>,
}

impl UserTable {
    fn get(&self, user_id: Uuid) -> StoreResult<&UserRecord> {
        self.users
            .get(&user_id)
            .ok_or(StoreError::UserNotFound(user_id))
    }

    fn active_principal(&self, user_id: Uuid) -> StoreResult<Principal> {
        let record = self.get(user_id)?;
        if !record.is_active() {
            return Err(StoreError::InactivePrincipal(user_id));
        }

        Ok(record.principal())
    }

    fn insert(&mut self, new_user: NewUser) -> StoreResult<UserRecord> {
        let email = normalize_email(&new_user.email);
        if self.emails.contains_key(&email) {
            return Err(StoreError::EmailTaken);
        }

        let now = Timestamp::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            email: email.clone(),
            full_name: new_user.full_name.trim().to_owned(),
            role: new_user.role,
            status: new_user.status,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };

        self.emails.insert(email, record.id);
        self.users.insert(record.id, record.clone());
        Ok(record)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserRepository for UserStore {
    async fn find_user(&self, user_id: Uuid) -> Option<UserRecord> {
        self.inner.read().await.users.get(&user_id).cloned()
    }

    async fn find_user_by_email(&self, email: &str) -> Option<UserRecord> {
        let table = self.inner.read().await;
        let user_id = table.emails.get(&normalize_email(email))?;
        table.users.get(user_id).cloned()
    }

    async fn list_users(&self) -> Vec<UserRecord> {
        let table = self.inner.read().await;
        let mut users: Vec<UserRecord> = table.users.values().cloned().collect();
        users.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.email.cmp(&b.email))
        });
        users
    }

    async fn insert_user(&self, new_user: NewUser) -> StoreResult<UserRecord> {
        let record = self.inner.write().await.insert(new_user)?;

        tracing::debug!(
            target: TRACING_TARGET,
            user_id = %record.id,
            role = %record.role,
            "user inserted"
        );

        Ok(record)
    }

    async fn create_user<F>(
        &self,
        actor_id: Uuid,
        new_user: NewUser,
        authorize: F,
    ) -> StoreResult<UserRecord>
    where
        F: FnOnce(&Principal) -> surveyor_policy::Result + Send,
    {
        let mut table = self.inner.write().await;
        let actor = table.active_principal(actor_id)?;
        authorize(&actor)?;

        let record = table.insert(new_user)?;

        tracing::debug!(
            target: TRACING_TARGET,
            actor_id = %actor_id,
            user_id = %record.id,
            role = %record.role,
            "user created"
        );

        Ok(record)
    }

    async fn update_user<F>(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        changes: UpdateUser,
        authorize: F,
    ) -> StoreResult<UserRecord>
    where
        F: FnOnce(&Principal, &Principal) -> surveyor_policy::Result + Send,
    {
        let mut table = self.inner.write().await;
        let actor = table.active_principal(actor_id)?;
        let target = table.get(target_id)?.principal();
        authorize(&actor, &target)?;

        let record = table
            .users
            .get_mut(&target_id)
            .ok_or(StoreError::UserNotFound(target_id))?;

        if let Some(full_name) = changes.full_name {
            record.full_name = full_name.trim().to_owned();
        }
        if let Some(role) = changes.role {
            record.role = role;
        }
        if let Some(status) = changes.status {
            record.status = status;
        }
        record.updated_at = Timestamp::now();

        tracing::debug!(
            target: TRACING_TARGET,
            actor_id = %actor_id,
            user_id = %target_id,
            role = %record.role,
            status = %record.status,
            "user updated"
        );

        Ok(record.clone())
    }

    async fn update_profile(&self, user_id: Uuid, full_name: String) -> StoreResult<UserRecord> {
        let mut table = self.inner.write().await;
        table.active_principal(user_id)?;

        let record = table
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::UserNotFound(user_id))?;
        record.full_name = full_name.trim().to_owned();
        record.updated_at = Timestamp::now();

        Ok(record.clone())
    }

    async fn delete_user<F>(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        authorize: F,
    ) -> StoreResult<UserRecord>
    where
        F: FnOnce(&Principal, &Principal) -> surveyor_policy::Result + Send,
    {
        let mut table = self.inner.write().await;
        let actor = table.active_principal(actor_id)?;
        let target = table.get(target_id)?.principal();
        authorize(&actor, &target)?;

        let record = table
            .users
            .remove(&target_id)
            .ok_or(StoreError::UserNotFound(target_id))?;
        table.emails.remove(&record.email);

        tracing::debug!(
            target: TRACING_TARGET,
            actor_id = %actor_id,
            user_id = %target_id,
            "user deleted"
        );

        Ok(record)
    }
}
