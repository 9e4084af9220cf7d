//! Message deletion handler

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    domain::{
        auth::{identity::Identity, sessions::SessionService, users::UserService},
        messaging::messages::MessageService,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Delete one of the signed-in user's messages
#[utoipa::path(
    delete,
    operation_id = "delete_message",
    tag = "Messaging",
    path = "/api/v1/users/me/messages/{id}",
    params(("id" = Uuid, Path, description = "The message id")),
    security(("bearer_token" = [])),
    responses(
        (status = StatusCode::NO_CONTENT, description = "Message deleted"),
        (status = StatusCode::NOT_FOUND, description = "No such message in the user's inbox", body = ErrorResponse),
        (status = StatusCode::UNAUTHORIZED, description = "Missing or invalid bearer token", body = ErrorResponse),
    )
)]
pub async fn handler<U: UserService, S: SessionService, M: MessageService>(
    State(state): State<AppState<U, S, M>>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .messages
        .delete_message(&identity.user_id, &id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
