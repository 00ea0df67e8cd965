//! Common validation utilities.

use validator::ValidationError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted length for user-facing display names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Validates that a password meets the minimum strength requirements:
/// at least 8 characters with one letter and one digit.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        let mut err = ValidationError::new("password_length");
        err.message = Some("Password must be at least 8 characters".into());
        return Err(err);
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        let mut err = ValidationError::new("password_strength");
        err.message = Some("Password must contain at least one letter and one digit".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a name is non-empty after trimming and within bounds.
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("name_empty");
        err.message = Some("Name must not be empty".into());
        return Err(err);
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        let mut err = ValidationError::new("name_length");
        err.message = Some("Name must be at most 100 characters".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_strength_valid() {
        assert!(validate_password_strength("abcdef12").is_ok());
        assert!(validate_password_strength("longerPassword99").is_ok());
    }

    #[test]
    fn test_password_strength_too_short() {
        assert!(validate_password_strength("ab1").is_err());
    }

    #[test]
    fn test_password_strength_missing_digit() {
        assert!(validate_password_strength("abcdefgh").is_err());
    }

    #[test]
    fn test_password_strength_missing_letter() {
        assert!(validate_password_strength("12345678").is_err());
    }

    #[test]
    fn test_display_name_valid() {
        assert!(validate_display_name("Acme Corp").is_ok());
    }

    #[test]
    fn test_display_name_empty() {
        assert!(validate_display_name("   ").is_err());
    }

    #[test]
    fn test_display_name_too_long() {
        assert!(validate_display_name(&"x".repeat(101)).is_err());
    }
}
