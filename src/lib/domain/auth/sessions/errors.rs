//! Error types for sessions and sign-in

use thiserror::Error;

/// Errors that can occur when signing in
#[derive(Debug, Error)]
pub enum SignInError {
    /// Unknown identifier or wrong password. Deliberately indistinguishable.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// The account exists but has not completed email verification
    #[error("Please verify your account before signing in")]
    NotVerified,

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when resolving a session token to an identity
#[derive(Debug, Error)]
pub enum IdentifySessionError {
    /// The token matches no unexpired session
    #[error("Session not found")]
    SessionNotFound,

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
