//! Response payloads.

mod authentication;
mod errors;
mod profile;
mod users;

pub use authentication::LoginResponse;
pub use errors::ErrorResponse;
pub use profile::Profile;
pub use users::{ManagedUser, User};
