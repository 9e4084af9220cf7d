//! Passwords

use std::fmt;

use thiserror::Error;

/// Password error
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Password is too short
    #[error("Your password is too short. It must be at least 6 characters long.")]
    TooShort,

    /// Password is too long
    #[error("Your password is too long. It must be at most 50 characters long.")]
    TooLong,
}

/// A clear-text password. Only ever held in memory long enough to be hashed
/// or verified; both `Display` and `Debug` obfuscate the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Create a new password
    pub fn new(raw: &str) -> Result<Self, PasswordError> {
        if raw.len() < 6 {
            return Err(PasswordError::TooShort);
        }

        if raw.len() > 50 {
            return Err(PasswordError::TooLong);
        }

        Ok(Self(raw.to_string()))
    }

    /// Get the password as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Get the password as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_password_display_obfuscates() -> TestResult {
        let password = Password::new("correcthorsebatterystaple")?;
        assert_eq!(format!("{}", password), "********");

        Ok(())
    }

    #[test]
    fn test_password_debug_obfuscates() -> TestResult {
        let password = Password::new("correcthorsebatterystaple")?;
        assert_eq!(format!("{:?}", password), "********");

        Ok(())
    }

    #[test]
    fn test_get_password_as_bytes() -> TestResult {
        let password = Password::new("correcthorsebatterystaple")?;
        assert_eq!(password.as_bytes(), b"correcthorsebatterystaple");

        Ok(())
    }

    #[test]
    fn test_new_password_too_short() {
        let result = Password::new("short");
        assert!(result.is_err());
        assert!(matches!(result, Err(PasswordError::TooShort)))
    }

    #[test]
    fn test_new_password_too_long() {
        let result = Password::new(&"a".repeat(51));
        assert!(result.is_err());
        assert!(matches!(result, Err(PasswordError::TooLong)))
    }
}
