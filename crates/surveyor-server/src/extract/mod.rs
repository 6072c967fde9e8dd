//! Request extractors.
//!
//! Every extractor rejects with the server's JSON [`Error`] body.
//!
//! [`Error`]: crate::handler::Error

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthClaims, AuthHeader, AuthState};
pub use crate::extract::reject::{Json, Path, ValidateJson};
