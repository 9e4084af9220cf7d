//! Error types for users, registration and verification

use thiserror::Error;

use crate::domain::communication::mailer::MailerError;

/// Errors that can occur when registering a user
#[derive(Debug, Error)]
pub enum RegisterUserError {
    /// A verified user already owns the requested username
    #[error("Username already exists")]
    UsernameTaken,

    /// A verified user already owns the email address
    #[error("Email already exists")]
    EmailTaken,

    /// The verification email could not be delivered. The stored user record
    /// is not rolled back.
    #[error("Could not send the verification email")]
    EmailDelivery(#[from] MailerError),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when validating a verification code
#[derive(Debug, Error)]
pub enum VerifyCodeError {
    /// No user owns the username
    #[error("User not found")]
    UserNotFound,

    /// The user already completed verification; the one-way transition has
    /// consumed the code
    #[error("User is already verified")]
    AlreadyVerified,

    /// The submitted code does not match the stored one
    #[error("Invalid code")]
    InvalidCode,

    /// The code's validity window has passed
    #[error("Code expired")]
    CodeExpired,

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when getting a user
#[derive(Debug, Error)]
pub enum GetUserError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when updating a user
#[derive(Debug, Error)]
pub enum UpdateUserError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<GetUserError> for VerifyCodeError {
    fn from(err: GetUserError) -> Self {
        match err {
            GetUserError::UserNotFound => VerifyCodeError::UserNotFound,
            GetUserError::UnknownError(err) => VerifyCodeError::UnknownError(err),
        }
    }
}

impl From<UpdateUserError> for VerifyCodeError {
    fn from(err: UpdateUserError) -> Self {
        match err {
            UpdateUserError::UserNotFound => VerifyCodeError::UserNotFound,
            UpdateUserError::UnknownError(err) => VerifyCodeError::UnknownError(err),
        }
    }
}
