//! Drop-in replacements for axum's body and path extractors.
//!
//! Rejections are converted into the server's [`Error`] so clients always
//! receive the JSON error body.
//!
//! [`Error`]: crate::handler::Error

mod json;
mod path;
mod validated_json;

pub use self::json::Json;
pub use self::path::Path;
pub use self::validated_json::ValidateJson;

/// Keeps the first lines of a rejection message and caps its length.
fn sanitize_error_message(message: &str) -> String {
    let lines = message.lines().take(3).collect::<Vec<_>>();
    lines.join(" ").chars().take(200).collect()
}
