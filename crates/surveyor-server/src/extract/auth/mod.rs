//! Authentication extractors.
//!
//! - [`AuthClaims`] - access token claims, signing and verification
//! - [`AuthHeader`] - verified bearer token of the request
//! - [`AuthState`] - acting user re-read from the user store

mod claims;
mod header;
mod state;

pub use self::claims::AuthClaims;
pub use self::header::AuthHeader;
pub use self::state::AuthState;
