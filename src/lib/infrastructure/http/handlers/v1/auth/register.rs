//! Registration handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{
        auth::{
            sessions::SessionService,
            users::{NewRegistration, Password, UserService, Username},
        },
        communication::email_addresses::EmailAddress,
        messaging::messages::MessageService,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Registration request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterBody {
    /// The requested username
    #[schema(example = "alice")]
    username: String,

    /// The new user's email address
    #[schema(example = "email@example.com")]
    email: String,

    /// The new user's password
    #[schema(example = "correcthorsebatterystaple")]
    password: String,
}

impl TryFrom<RegisterBody> for NewRegistration {
    type Error = ApiError;

    fn try_from(body: RegisterBody) -> Result<Self, Self::Error> {
        Ok(Self::new(
            Uuid::now_v7(),
            Username::new(&body.username)?,
            EmailAddress::new(&body.email)?,
            Password::new(&body.password)?,
        ))
    }
}

/// Registration response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    id: Uuid,

    #[schema(example = "Verification email sent")]
    message: String,
}

/// Register a user and send them a verification code
#[utoipa::path(
    post,
    operation_id = "register",
    tag = "Auth",
    path = "/api/v1/users",
    request_body = RegisterBody,
    responses(
        (status = StatusCode::CREATED, description = "Verification email sent", body = RegisterResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Unprocessable entity", body = ErrorResponse),
        (status = StatusCode::CONFLICT, description = "Username or email taken", body = ErrorResponse, example = json!({"error": "Username already exists"})),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Verification email could not be sent", body = ErrorResponse),
    )
)]
pub async fn handler<U: UserService, S: SessionService, M: MessageService>(
    State(state): State<AppState<U, S, M>>,
    request: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let Json(request) = request?;

    let registration: NewRegistration = request.try_into()?;

    let id = state.users.register(&registration).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id,
            message: "Verification email sent".to_string(),
        }),
    ))
}
