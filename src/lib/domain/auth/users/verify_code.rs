//! One-time verification codes

use std::fmt;

use rand::Rng;
use thiserror::Error;

/// An error that can occur when parsing a verification code
#[derive(Debug, Error)]
pub enum VerifyCodeParseError {
    /// The code is not exactly six ASCII digits
    #[error("Verification code must be a 6-digit number")]
    InvalidFormat,
}

/// A 6-digit numeric one-time code proving control of an email address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyCode(String);

impl VerifyCode {
    /// Generate a uniformly random code in `100000..=999999`.
    pub fn generate() -> Self {
        let code = rand::thread_rng().gen_range(100_000..=999_999);

        Self(code.to_string())
    }

    /// Parse a code from its stored string form.
    pub fn new(raw: &str) -> Result<Self, VerifyCodeParseError> {
        if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VerifyCodeParseError::InvalidFormat);
        }

        Ok(Self(raw.to_string()))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerifyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_generated_code_is_six_digits() {
        for _ in 0..100 {
            let code = VerifyCode::generate();

            assert_eq!(code.as_str().len(), 6);
            assert!(code.as_str().bytes().all(|b| b.is_ascii_digit()));
            assert_ne!(code.as_str().as_bytes()[0], b'0');
        }
    }

    #[test]
    fn test_parse_valid_code() -> TestResult {
        let code = VerifyCode::new("123456")?;

        assert_eq!(code.as_str(), "123456");

        Ok(())
    }

    #[test]
    fn test_parse_rejects_short_code() {
        assert!(matches!(
            VerifyCode::new("12345"),
            Err(VerifyCodeParseError::InvalidFormat)
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric_code() {
        assert!(matches!(
            VerifyCode::new("12345a"),
            Err(VerifyCodeParseError::InvalidFormat)
        ));
    }
}
