//! Message acceptance gate handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        auth::{identity::Identity, sessions::SessionService, users::UserService},
        messaging::messages::MessageService,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Acceptance gate request and response body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AcceptMessagesBody {
    /// Whether anonymous messages are accepted
    #[schema(example = true)]
    is_accepting_messages: bool,
}

/// Read the signed-in user's message acceptance gate
#[utoipa::path(
    get,
    operation_id = "get_accept_messages",
    tag = "Messaging",
    path = "/api/v1/users/me/accept-messages",
    security(("bearer_token" = [])),
    responses(
        (status = StatusCode::OK, description = "The current gate state", body = AcceptMessagesBody),
        (status = StatusCode::UNAUTHORIZED, description = "Missing or invalid bearer token", body = ErrorResponse),
    )
)]
pub async fn get_handler<U: UserService, S: SessionService, M: MessageService>(
    State(state): State<AppState<U, S, M>>,
    identity: Identity,
) -> Result<(StatusCode, Json<AcceptMessagesBody>), ApiError> {
    let is_accepting_messages = state.users.is_accepting_messages(&identity.user_id).await?;

    Ok((
        StatusCode::OK,
        Json(AcceptMessagesBody {
            is_accepting_messages,
        }),
    ))
}

/// Open or close the signed-in user's message acceptance gate.
///
/// Takes effect for future submissions only; messages already in the inbox
/// are untouched.
#[utoipa::path(
    put,
    operation_id = "set_accept_messages",
    tag = "Messaging",
    path = "/api/v1/users/me/accept-messages",
    request_body = AcceptMessagesBody,
    security(("bearer_token" = [])),
    responses(
        (status = StatusCode::OK, description = "The new gate state", body = AcceptMessagesBody),
        (status = StatusCode::UNAUTHORIZED, description = "Missing or invalid bearer token", body = ErrorResponse),
    )
)]
pub async fn put_handler<U: UserService, S: SessionService, M: MessageService>(
    State(state): State<AppState<U, S, M>>,
    identity: Identity,
    request: Result<Json<AcceptMessagesBody>, JsonRejection>,
) -> Result<(StatusCode, Json<AcceptMessagesBody>), ApiError> {
    let Json(request) = request?;

    state
        .users
        .set_accepting_messages(&identity.user_id, request.is_accepting_messages)
        .await?;

    Ok((StatusCode::OK, Json(request)))
}
