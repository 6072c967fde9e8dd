//! Request payloads.

mod authentication;
mod paths;
mod profile;
mod users;
mod validations;

pub use authentication::Login;
pub use paths::UserPathParams;
pub use profile::UpdateProfile;
pub use users::{CreateUser, UpdateUser};
