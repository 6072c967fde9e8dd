//! Request validation utilities.

use validator::ValidationError;

pub fn validation_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_owned().into());
    error
}

/// Rejects display names that are empty once surrounding whitespace is removed.
pub fn validate_full_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(validation_error(
            "full_name_blank",
            "Full name cannot be blank",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert!(validate_full_name("").is_err());
        assert!(validate_full_name("   ").is_err());
        assert!(validate_full_name("\t\n").is_err());
    }

    #[test]
    fn padded_names_are_accepted() {
        assert!(validate_full_name("Ana Petrović").is_ok());
        assert!(validate_full_name("  Ana  ").is_ok());
    }
}
