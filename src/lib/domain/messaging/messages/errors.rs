//! Error types for the inbox operations

use thiserror::Error;

use crate::domain::auth::users::errors::GetUserError;

/// Errors that can occur when an anonymous sender submits a message
#[derive(Debug, Error)]
pub enum SubmitMessageError {
    /// No user owns the target username
    #[error("User not found")]
    UserNotFound,

    /// The target user's acceptance gate is closed
    #[error("User is not accepting messages")]
    MessagesClosed,

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when listing a user's messages
#[derive(Debug, Error)]
pub enum ListMessagesError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when deleting a message
#[derive(Debug, Error)]
pub enum DeleteMessageError {
    /// No message with that id in the owner's collection
    #[error("Message not found")]
    MessageNotFound,

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<GetUserError> for SubmitMessageError {
    fn from(err: GetUserError) -> Self {
        match err {
            GetUserError::UserNotFound => SubmitMessageError::UserNotFound,
            GetUserError::UnknownError(err) => SubmitMessageError::UnknownError(err),
        }
    }
}

impl From<GetUserError> for ListMessagesError {
    fn from(err: GetUserError) -> Self {
        match err {
            GetUserError::UserNotFound => ListMessagesError::UserNotFound,
            GetUserError::UnknownError(err) => ListMessagesError::UnknownError(err),
        }
    }
}
