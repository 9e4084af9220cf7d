//! Message content

use std::fmt;

use thiserror::Error;

/// An error that can occur when creating message content
#[derive(Debug, Error)]
pub enum MessageContentError {
    /// The content is empty
    #[error("Message must be at least 1 character long")]
    Empty,

    /// The content is longer than 500 characters
    #[error("Message must be at most 500 characters long")]
    TooLong,
}

/// The free text of an anonymous message, 1 to 500 characters.
///
/// Submitters are unauthenticated and untrusted, so the bounds are enforced
/// here regardless of any client-side validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create new message content
    pub fn new(raw: &str) -> Result<Self, MessageContentError> {
        if raw.is_empty() {
            return Err(MessageContentError::Empty);
        }

        if raw.chars().count() > 500 {
            return Err(MessageContentError::TooLong);
        }

        Ok(Self(raw.to_string()))
    }

    /// Create message content without validating it, e.g. when loading a
    /// previously validated message from the database.
    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.to_string())
    }

    /// Get the content as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MessageContent> for String {
    fn from(content: MessageContent) -> Self {
        content.0
    }
}
