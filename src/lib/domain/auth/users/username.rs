//! Usernames

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
}

/// An error that can occur when creating a username
#[derive(Debug, Error)]
pub enum UsernameError {
    /// The username is too short
    #[error("Username must be at least 2 characters long")]
    TooShort,

    /// The username is too long
    #[error("Username must be at most 50 characters long")]
    TooLong,

    /// The username contains characters outside `[A-Za-z0-9_]`
    #[error("Username must only contain letters, numbers and underscores")]
    InvalidCharacters,
}

/// A user's public name, the handle anonymous senders address messages to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new username
    pub fn new(raw: &str) -> Result<Self, UsernameError> {
        let trimmed = raw.trim();

        if trimmed.chars().count() < 2 {
            return Err(UsernameError::TooShort);
        }

        if trimmed.chars().count() > 50 {
            return Err(UsernameError::TooLong);
        }

        if !USERNAME_REGEX.is_match(trimmed) {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create a username without validating it, e.g. when loading a
    /// previously validated name from the database.
    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.to_string())
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}
