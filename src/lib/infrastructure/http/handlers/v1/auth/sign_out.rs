//! Sign out handler

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::{
    domain::{
        auth::{sessions::SessionService, users::UserService},
        messaging::messages::MessageService,
    },
    infrastructure::http::{errors::ApiError, extract::bearer_token, state::AppState},
};

/// End the current session. Unknown tokens still get a 204.
#[utoipa::path(
    delete,
    operation_id = "sign_out",
    tag = "Auth",
    path = "/api/v1/sessions",
    security(("bearer_token" = [])),
    responses(
        (status = StatusCode::NO_CONTENT, description = "Signed out"),
        (status = StatusCode::UNAUTHORIZED, description = "Missing bearer token", body = ErrorResponse),
    )
)]
pub async fn handler<U: UserService, S: SessionService, M: MessageService>(
    State(state): State<AppState<U, S, M>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers)?;

    state.sessions.sign_out(token).await?;

    Ok(StatusCode::NO_CONTENT)
}
