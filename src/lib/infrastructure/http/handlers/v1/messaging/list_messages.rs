//! Inbox listing handler

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{
        auth::{identity::Identity, sessions::SessionService, users::UserService},
        messaging::messages::{Message, MessageService},
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// A single inbox message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    id: Uuid,

    #[schema(example = "You give great advice!")]
    content: String,

    created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            content: message.content.into(),
            created_at: message.created_at,
        }
    }
}

/// Inbox response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListMessagesResponse {
    /// The signed-in user's messages, newest first
    messages: Vec<MessageResponse>,
}

/// List the signed-in user's messages, newest first
#[utoipa::path(
    get,
    operation_id = "list_messages",
    tag = "Messaging",
    path = "/api/v1/users/me/messages",
    security(("bearer_token" = [])),
    responses(
        (status = StatusCode::OK, description = "The user's inbox", body = ListMessagesResponse),
        (status = StatusCode::UNAUTHORIZED, description = "Missing or invalid bearer token", body = ErrorResponse),
    )
)]
pub async fn handler<U: UserService, S: SessionService, M: MessageService>(
    State(state): State<AppState<U, S, M>>,
    identity: Identity,
) -> Result<(StatusCode, Json<ListMessagesResponse>), ApiError> {
    let messages = state.messages.list_messages(&identity.user_id).await?;

    Ok((
        StatusCode::OK,
        Json(ListMessagesResponse {
            messages: messages.into_iter().map(MessageResponse::from).collect(),
        }),
    ))
}
