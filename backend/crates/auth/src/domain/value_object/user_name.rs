//! User Name Value Object
//!
//! Optional login handle, matched against the same identifier field as
//! the email at login time. Unique when set.
//!
//! ## Invariants
//! - 3..=50 characters after trimming
//! - no control characters, no interior '@' (would be ambiguous with
//!   email identifiers)

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length for a user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for a user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 50;

/// User name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name with validation
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let name = raw.into().trim().to_string();

        let char_count = name.chars().count();

        if char_count < USER_NAME_MIN_LENGTH {
            return Err(AppError::validation(
                "username",
                format!(
                    "Username must be at least {} characters",
                    USER_NAME_MIN_LENGTH
                ),
            ));
        }

        if char_count > USER_NAME_MAX_LENGTH {
            return Err(AppError::validation(
                "username",
                format!(
                    "Username must be less than {} characters",
                    USER_NAME_MAX_LENGTH
                ),
            ));
        }

        if name.chars().any(|c| c.is_control()) {
            return Err(AppError::validation(
                "username",
                "Username contains invalid characters",
            ));
        }

        if name.contains('@') {
            return Err(AppError::validation(
                "username",
                "Username must not contain '@'",
            ));
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the user name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_valid() {
        assert!(UserName::new("abc").is_ok());
        assert!(UserName::new("some_user.99").is_ok());
        assert!(UserName::new("  padded  ").is_ok()); // trimmed to "padded"
    }

    #[test]
    fn test_user_name_trimmed() {
        let name = UserName::new("  alice  ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_user_name_too_short() {
        assert!(UserName::new("ab").is_err());
        assert!(UserName::new("  a  ").is_err()); // trimming first
    }

    #[test]
    fn test_user_name_too_long() {
        let long = "a".repeat(USER_NAME_MAX_LENGTH + 1);
        assert!(UserName::new(long).is_err());

        let at_limit = "a".repeat(USER_NAME_MAX_LENGTH);
        assert!(UserName::new(at_limit).is_ok());
    }

    #[test]
    fn test_user_name_rejects_at_sign() {
        assert!(UserName::new("user@host").is_err());
    }

    #[test]
    fn test_user_name_rejects_control_chars() {
        assert!(UserName::new("user\u{0000}name").is_err());
    }
}
