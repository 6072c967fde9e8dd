//! In-memory user directory.
//!
//! The directory is the authoritative source of every user's role and status.
//! Guarded mutations re-read the acting principal under the write lock and run
//! the supplied authorization check before touching the table, so a role
//! downgrade committed by one request is visible to the next check.

mod error;
mod model;
mod repository;

pub use error::{StoreError, StoreResult};
pub use model::{NewUser, UpdateUser, UserRecord};
pub use repository::{UserRepository, UserStore};

/// Tracing target for user directory operations.
pub(crate) const TRACING_TARGET: &str = "surveyor_server::store";
