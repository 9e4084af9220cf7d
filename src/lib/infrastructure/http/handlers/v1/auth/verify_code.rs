//! Email verification handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        auth::{
            sessions::SessionService,
            users::{UserService, Username},
        },
        messaging::messages::MessageService,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Verify code request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyCodeBody {
    /// The username the code was sent to
    #[schema(example = "alice")]
    username: String,

    /// The six digit code from the verification email
    #[schema(example = "123456")]
    code: String,
}

/// Verify code response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyCodeResponse {
    #[schema(example = "Account verified successfully")]
    message: String,
}

/// Verify a user's email address with the emailed code
#[utoipa::path(
    post,
    operation_id = "verify_code",
    tag = "Auth",
    path = "/api/v1/users/verify",
    request_body = VerifyCodeBody,
    responses(
        (status = StatusCode::OK, description = "Account verified", body = VerifyCodeResponse),
        (status = StatusCode::NOT_FOUND, description = "User not found", body = ErrorResponse),
        (status = StatusCode::CONFLICT, description = "Account already verified", body = ErrorResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Incorrect or expired code", body = ErrorResponse, example = json!({"error": "Incorrect verification code"})),
    )
)]
pub async fn handler<U: UserService, S: SessionService, M: MessageService>(
    State(state): State<AppState<U, S, M>>,
    request: Result<Json<VerifyCodeBody>, JsonRejection>,
) -> Result<(StatusCode, Json<VerifyCodeResponse>), ApiError> {
    let Json(request) = request?;

    let username = Username::new(&request.username)?;

    state.users.verify_code(&username, &request.code).await?;

    Ok((
        StatusCode::OK,
        Json(VerifyCodeResponse {
            message: "Account verified successfully".to_string(),
        }),
    ))
}
