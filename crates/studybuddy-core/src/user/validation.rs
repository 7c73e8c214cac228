//! Username and secret validation.
//!
//! Rules:
//! - Username: 3-32 characters, no whitespace, compared case-insensitively
//! - Secret: at least 4 characters

use crate::error::{Result, StudyBuddyError};

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Minimum secret length.
pub const MIN_SECRET_LENGTH: usize = 4;

/// Validates a username and returns its normalized form.
pub fn validate_username(username: &str) -> Result<String> {
    let trimmed = username.trim();
    let len = trimmed.chars().count();

    if len < MIN_USERNAME_LENGTH || len > MAX_USERNAME_LENGTH {
        return Err(StudyBuddyError::validation(format!(
            "Username must be {}-{} characters long",
            MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
        )));
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(StudyBuddyError::validation(
            "Username cannot contain spaces",
        ));
    }

    Ok(trimmed.to_string())
}

/// Validates a secret chosen at registration or reset.
pub fn validate_secret(secret: &str) -> Result<()> {
    if secret.chars().count() < MIN_SECRET_LENGTH {
        return Err(StudyBuddyError::validation(format!(
            "Password must be at least {} characters long",
            MIN_SECRET_LENGTH
        )));
    }
    Ok(())
}

/// Usernames are unique regardless of letter case.
pub fn same_username(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username("  alice ").unwrap(), "alice");
        assert!(validate_username("al").is_err());
        assert!(validate_username("ali ce").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
        // Bengali names count characters, not bytes
        assert!(validate_username("রিমন").is_ok());
    }

    #[test]
    fn test_validate_secret() {
        assert!(validate_secret("abc").is_err());
        assert!(validate_secret("secret1").is_ok());
    }

    #[test]
    fn test_same_username_ignores_case() {
        assert!(same_username("Alice", "alice"));
        assert!(!same_username("alice", "alicia"));
    }
}
