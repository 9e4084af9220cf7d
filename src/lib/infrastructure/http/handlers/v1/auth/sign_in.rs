//! Sign in handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        auth::{sessions::SessionService, users::UserService},
        messaging::messages::MessageService,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Sign in request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SignInBody {
    /// Username or email address
    #[schema(example = "alice")]
    identifier: String,

    /// The account password
    #[schema(example = "correcthorsebatterystaple")]
    password: String,
}

/// Sign in response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignInResponse {
    /// The bearer token for subsequent requests
    token: String,
}

/// Sign in with a username or email address plus password
#[utoipa::path(
    post,
    operation_id = "sign_in",
    tag = "Auth",
    path = "/api/v1/sessions",
    request_body = SignInBody,
    responses(
        (status = StatusCode::CREATED, description = "Signed in", body = SignInResponse),
        (status = StatusCode::UNAUTHORIZED, description = "Incorrect username or password", body = ErrorResponse),
        (status = StatusCode::FORBIDDEN, description = "Account not yet verified", body = ErrorResponse),
    )
)]
pub async fn handler<U: UserService, S: SessionService, M: MessageService>(
    State(state): State<AppState<U, S, M>>,
    request: Result<Json<SignInBody>, JsonRejection>,
) -> Result<(StatusCode, Json<SignInResponse>), ApiError> {
    let Json(request) = request?;

    let token = state
        .sessions
        .sign_in(&request.identifier, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(SignInResponse { token })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::{
        domain::auth::sessions::{errors::SignInError, tests::MockSessionService},
        infrastructure::http::{
            errors::ErrorResponse,
            handlers::v1::auth::sign_in::{SignInBody, SignInResponse},
            servers::https::router,
            state::tests::test_state,
        },
    };

    impl SignInBody {
        fn new(identifier: &str, password: &str) -> Self {
            Self {
                identifier: identifier.to_string(),
                password: password.to_string(),
            }
        }
    }

    #[tokio::test]
    async fn test_sign_in_success() -> TestResult {
        let mut sessions = MockSessionService::new();

        sessions
            .expect_sign_in()
            .times(1)
            .withf(|identifier, password| {
                identifier == "alice" && password == "correcthorsebatterystaple"
            })
            .returning(|_, _| Ok("token".to_string()));

        let state = test_state(None, Some(sessions), None);

        let response = TestServer::new(router(state))?
            .post("/api/v1/sessions")
            .json(&SignInBody::new("alice", "correcthorsebatterystaple"))
            .await;

        let json = response.json::<SignInResponse>();

        assert_eq!(response.status_code(), StatusCode::CREATED);
        assert_eq!(json.token, "token");

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_invalid_credentials() -> TestResult {
        let mut sessions = MockSessionService::new();

        sessions
            .expect_sign_in()
            .times(1)
            .returning(|_, _| Err(SignInError::InvalidCredentials));

        let state = test_state(None, Some(sessions), None);

        let response = TestServer::new(router(state))?
            .post("/api/v1/sessions")
            .json(&SignInBody::new("alice", "wrong password"))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(json.error, "Incorrect username or password");

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_unverified_account() -> TestResult {
        let mut sessions = MockSessionService::new();

        sessions
            .expect_sign_in()
            .times(1)
            .returning(|_, _| Err(SignInError::NotVerified));

        let state = test_state(None, Some(sessions), None);

        let response = TestServer::new(router(state))?
            .post("/api/v1/sessions")
            .json(&SignInBody::new("alice", "correcthorsebatterystaple"))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(json.error, "Please verify your account before signing in");

        Ok(())
    }
}
