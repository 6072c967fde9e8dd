use serde::Deserialize;
use validator::Validate;

use super::validations::validate_full_name;

/// Request payload for changing one's own display name.
///
/// Role and status are not accepted here.
#[must_use]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProfile {
    /// New display name.
    #[validate(length(min = 1, max = 100))]
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,
}
