//! Input validation for new accounts.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Minimum number of characters accepted for a password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Login credentials proposed for a new account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// Proposed e-mail address.
    pub email: &'a str,
    /// Proposed plaintext password.
    pub password: &'a str,
}

impl<'a> Credentials<'a> {
    /// Creates new credentials.
    #[inline]
    pub const fn new(email: &'a str, password: &'a str) -> Self {
        Self { email, password }
    }
}

/// Checks that the e-mail address has the shape `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::MalformedEmail)
    }
}

/// Checks that the password has at least [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(ValidationError::PasswordTooShort {
            min_length: MIN_PASSWORD_LENGTH,
        })
    }
}

/// Validates e-mail then password, reporting the first failure.
pub fn validate_credentials(credentials: Credentials<'_>) -> Result<(), ValidationError> {
    validate_email(credentials.email)?;
    validate_password(credentials.password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_emails() {
        for email in ["ana@prefeitura.gov.br", "x@y.z", "first.last+tag@example.com"] {
            assert_eq!(validate_email(email), Ok(()), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "plain", "no-at.example.com", "a@b", "a @b.c", "a@b@c.d"] {
            assert_eq!(
                validate_email(email),
                Err(ValidationError::MalformedEmail),
                "{email}"
            );
        }
    }

    #[test]
    fn password_minimum_length_is_six_characters() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
        // Counted in characters, not bytes.
        assert!(validate_password("ççççç").is_err());
        assert!(validate_password("çççççç").is_ok());
    }

    #[test]
    fn email_is_checked_before_password() {
        let credentials = Credentials::new("broken", "1");
        assert_eq!(
            validate_credentials(credentials),
            Err(ValidationError::MalformedEmail)
        );
    }
}
