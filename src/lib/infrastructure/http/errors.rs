//! API error-handling module

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{
    auth::{
        sessions::errors::{IdentifySessionError, SignInError},
        users::{
            errors::{GetUserError, RegisterUserError, UpdateUserError, VerifyCodeError},
            PasswordError, UsernameError, VerifyCodeParseError,
        },
    },
    communication::email_addresses::EmailAddressError,
    messaging::messages::{
        errors::{DeleteMessageError, ListMessagesError, SubmitMessageError},
        MessageContentError,
    },
};

/// An error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// The error message
    #[schema(example = "Internal server error")]
    pub error: String,
}

/// An error raised in the API
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApiError {
    /// The status code
    #[schema(example = 500, value_type = u16)]
    #[serde(with = "http_serde::status_code")]
    pub status: StatusCode,

    /// The error message
    #[schema(example = "Internal server error")]
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new unauthorized error
    pub fn new_401(message: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Create a new forbidden error
    pub fn new_403(message: &str) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// Create a new not found error
    pub fn new_404(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Create a new conflict error
    pub fn new_409(message: &str) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Create a new unprocessable entity error
    pub fn new_422(message: &str) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Log the underlying cause and hide it behind a generic message.
fn unknown_error(err: anyhow::Error) -> ApiError {
    error!("internal error: {err:?}");

    ApiError::new_500("An unknown error occurred, please try again")
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        unknown_error(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), &rejection.body_text())
    }
}

impl From<EmailAddressError> for ApiError {
    fn from(err: EmailAddressError) -> Self {
        match err {
            EmailAddressError::EmptyEmailAddress => {
                ApiError::new_422("Please provide an email address")
            }
            EmailAddressError::InvalidEmailAddress => {
                ApiError::new_422("Please provide a valid email address")
            }
        }
    }
}

impl From<UsernameError> for ApiError {
    fn from(err: UsernameError) -> Self {
        ApiError::new_422(&err.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::new_422(&err.to_string())
    }
}

impl From<MessageContentError> for ApiError {
    fn from(err: MessageContentError) -> Self {
        ApiError::new_422(&err.to_string())
    }
}

impl From<VerifyCodeParseError> for ApiError {
    fn from(err: VerifyCodeParseError) -> Self {
        ApiError::new_422(&err.to_string())
    }
}

impl From<RegisterUserError> for ApiError {
    fn from(err: RegisterUserError) -> Self {
        match err {
            RegisterUserError::UsernameTaken => ApiError::new_409("Username already exists"),
            RegisterUserError::EmailTaken => ApiError::new_409("Email already exists"),
            RegisterUserError::EmailDelivery(_) => {
                ApiError::new_500("Could not send the verification email")
            }
            RegisterUserError::UnknownError(err) => unknown_error(err),
        }
    }
}

impl From<VerifyCodeError> for ApiError {
    fn from(err: VerifyCodeError) -> Self {
        match err {
            VerifyCodeError::UserNotFound => ApiError::new_404("User not found"),
            VerifyCodeError::AlreadyVerified => ApiError::new_409("Account is already verified"),
            VerifyCodeError::InvalidCode => ApiError::new_422("Incorrect verification code"),
            VerifyCodeError::CodeExpired => ApiError::new_422(
                "Verification code has expired, please sign up again to get a new code",
            ),
            VerifyCodeError::UnknownError(err) => unknown_error(err),
        }
    }
}

impl From<GetUserError> for ApiError {
    fn from(err: GetUserError) -> Self {
        match err {
            GetUserError::UserNotFound => ApiError::new_404("User not found"),
            GetUserError::UnknownError(err) => unknown_error(err),
        }
    }
}

impl From<UpdateUserError> for ApiError {
    fn from(err: UpdateUserError) -> Self {
        match err {
            UpdateUserError::UserNotFound => ApiError::new_404("User not found"),
            UpdateUserError::UnknownError(err) => unknown_error(err),
        }
    }
}

impl From<SignInError> for ApiError {
    fn from(err: SignInError) -> Self {
        match err {
            SignInError::InvalidCredentials => {
                ApiError::new_401("Incorrect username or password")
            }
            SignInError::NotVerified => {
                ApiError::new_403("Please verify your account before signing in")
            }
            SignInError::UnknownError(err) => unknown_error(err),
        }
    }
}

impl From<IdentifySessionError> for ApiError {
    fn from(err: IdentifySessionError) -> Self {
        match err {
            IdentifySessionError::SessionNotFound => ApiError::new_401("Unauthorized"),
            IdentifySessionError::UnknownError(err) => unknown_error(err),
        }
    }
}

impl From<SubmitMessageError> for ApiError {
    fn from(err: SubmitMessageError) -> Self {
        match err {
            SubmitMessageError::UserNotFound => ApiError::new_404("User not found"),
            SubmitMessageError::MessagesClosed => {
                ApiError::new_403("User is not accepting messages")
            }
            SubmitMessageError::UnknownError(err) => unknown_error(err),
        }
    }
}

impl From<ListMessagesError> for ApiError {
    fn from(err: ListMessagesError) -> Self {
        match err {
            ListMessagesError::UserNotFound => ApiError::new_404("User not found"),
            ListMessagesError::UnknownError(err) => unknown_error(err),
        }
    }
}

impl From<DeleteMessageError> for ApiError {
    fn from(err: DeleteMessageError) -> Self {
        match err {
            DeleteMessageError::MessageNotFound => ApiError::new_404("Message not found"),
            DeleteMessageError::UnknownError(err) => unknown_error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use testresult::TestResult;

    use crate::domain::messaging::messages::errors::SubmitMessageError;

    use super::ApiError;

    #[tokio::test]
    async fn test_error_response() -> TestResult {
        let error = ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        };

        let response = error.into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await?;

        assert_eq!(body, r#"{"error":"Internal server error"}"#);

        Ok(())
    }

    #[test]
    fn test_unknown_error_does_not_leak_detail() {
        let api_error = ApiError::from(anyhow!("connection refused (127.0.0.1:5432)"));

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api_error.message.contains("127.0.0.1"));
    }

    #[test]
    fn test_messages_closed_maps_to_forbidden() {
        let api_error = ApiError::from(SubmitMessageError::MessagesClosed);

        assert_eq!(api_error.status, StatusCode::FORBIDDEN);
        assert_eq!(api_error.message, "User is not accepting messages");
    }
}
