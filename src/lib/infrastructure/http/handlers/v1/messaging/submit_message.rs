//! Anonymous message submission handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{
        auth::{
            sessions::SessionService,
            users::{UserService, Username},
        },
        messaging::messages::{MessageContent, MessageService},
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Submit message request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitMessageBody {
    /// The username of the recipient
    #[schema(example = "alice")]
    username: String,

    /// The message text, between 1 and 500 characters
    #[schema(example = "You give great advice!")]
    content: String,
}

/// Submit message response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitMessageResponse {
    id: Uuid,
    created_at: DateTime<Utc>,
}

/// Send an anonymous message to a user.
///
/// No authentication: the sender stays anonymous and nothing about them
/// is recorded.
#[utoipa::path(
    post,
    operation_id = "submit_message",
    tag = "Messaging",
    path = "/api/v1/messages",
    request_body = SubmitMessageBody,
    responses(
        (status = StatusCode::CREATED, description = "Message accepted", body = SubmitMessageResponse),
        (status = StatusCode::NOT_FOUND, description = "Recipient not found", body = ErrorResponse),
        (status = StatusCode::FORBIDDEN, description = "Recipient is not accepting messages", body = ErrorResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Unprocessable entity", body = ErrorResponse),
    )
)]
pub async fn handler<U: UserService, S: SessionService, M: MessageService>(
    State(state): State<AppState<U, S, M>>,
    request: Result<Json<SubmitMessageBody>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitMessageResponse>), ApiError> {
    let Json(request) = request?;

    let username = Username::new(&request.username)?;
    let content = MessageContent::new(&request.content)?;

    let message = state.messages.submit_message(&username, content).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitMessageResponse {
            id: message.id,
            created_at: message.created_at,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::{
        domain::messaging::messages::{
            errors::SubmitMessageError, tests::MockMessageService, Message, MessageContent,
        },
        infrastructure::http::{
            errors::ErrorResponse,
            handlers::v1::messaging::submit_message::{SubmitMessageBody, SubmitMessageResponse},
            servers::https::router,
            state::tests::test_state,
        },
    };

    impl SubmitMessageBody {
        fn new(username: &str, content: &str) -> Self {
            Self {
                username: username.to_string(),
                content: content.to_string(),
            }
        }
    }

    #[tokio::test]
    async fn test_submit_message_success() -> TestResult {
        let message = Message::accept_now(MessageContent::new("You give great advice!")?);
        let message_id = message.id.clone();

        let mut messages = MockMessageService::new();

        messages
            .expect_submit_message()
            .times(1)
            .withf(|username, content| {
                username.as_str() == "alice" && content.as_str() == "You give great advice!"
            })
            .returning(move |_, _| Ok(message.clone()));

        let state = test_state(None, None, Some(messages));

        let response = TestServer::new(router(state))?
            .post("/api/v1/messages")
            .json(&SubmitMessageBody::new("alice", "You give great advice!"))
            .await;

        let json = response.json::<SubmitMessageResponse>();

        assert_eq!(response.status_code(), StatusCode::CREATED);
        assert_eq!(json.id, message_id);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_message_recipient_not_found() -> TestResult {
        let mut messages = MockMessageService::new();

        messages
            .expect_submit_message()
            .times(1)
            .returning(|_, _| Err(SubmitMessageError::UserNotFound));

        let state = test_state(None, None, Some(messages));

        let response = TestServer::new(router(state))?
            .post("/api/v1/messages")
            .json(&SubmitMessageBody::new("ghost", "Hello?"))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(json.error, "User not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_message_recipient_closed() -> TestResult {
        let mut messages = MockMessageService::new();

        messages
            .expect_submit_message()
            .times(1)
            .returning(|_, _| Err(SubmitMessageError::MessagesClosed));

        let state = test_state(None, None, Some(messages));

        let response = TestServer::new(router(state))?
            .post("/api/v1/messages")
            .json(&SubmitMessageBody::new("alice", "Hello?"))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(json.error, "User is not accepting messages");

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_message_empty_content() -> TestResult {
        let state = test_state(None, None, None);

        let response = TestServer::new(router(state))?
            .post("/api/v1/messages")
            .json(&SubmitMessageBody::new("alice", ""))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_message_too_long_content() -> TestResult {
        let state = test_state(None, None, None);

        let response = TestServer::new(router(state))?
            .post("/api/v1/messages")
            .json(&SubmitMessageBody::new("alice", &"a".repeat(501)))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        Ok(())
    }
}
