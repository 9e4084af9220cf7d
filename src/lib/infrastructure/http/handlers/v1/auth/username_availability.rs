//! Username availability handler

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

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

/// Username availability query parameters
#[derive(Clone, Debug, Serialize, Deserialize, IntoParams)]
pub struct UsernameAvailabilityParams {
    /// The username to check
    username: String,
}

/// Username availability response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsernameAvailabilityResponse {
    /// Whether the username can still be registered
    available: bool,
}

/// Check whether a username is still available.
///
/// Only verified accounts reserve a username, so a name held by an
/// unverified registration still reports as available.
#[utoipa::path(
    get,
    operation_id = "username_availability",
    tag = "Auth",
    path = "/api/v1/users/username-availability",
    params(UsernameAvailabilityParams),
    responses(
        (status = StatusCode::OK, description = "Availability checked", body = UsernameAvailabilityResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid username", body = ErrorResponse),
    )
)]
pub async fn handler<U: UserService, S: SessionService, M: MessageService>(
    State(state): State<AppState<U, S, M>>,
    Query(params): Query<UsernameAvailabilityParams>,
) -> Result<(StatusCode, Json<UsernameAvailabilityResponse>), ApiError> {
    let username = Username::new(&params.username)?;

    let available = state.users.username_available(&username).await?;

    Ok((
        StatusCode::OK,
        Json(UsernameAvailabilityResponse { available }),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::{
        domain::auth::users::tests::MockUserService,
        infrastructure::http::{
            errors::ErrorResponse,
            handlers::v1::auth::username_availability::UsernameAvailabilityResponse,
            servers::https::router,
            state::tests::test_state,
        },
    };

    #[tokio::test]
    async fn test_username_available() -> TestResult {
        let mut users = MockUserService::new();

        users
            .expect_username_available()
            .times(1)
            .withf(|username| username.as_str() == "alice")
            .returning(|_| Ok(true));

        let state = test_state(Some(users), None, None);

        let response = TestServer::new(router(state))?
            .get("/api/v1/users/username-availability")
            .add_query_param("username", "alice")
            .await;

        let json = response.json::<UsernameAvailabilityResponse>();

        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(json.available);

        Ok(())
    }

    #[tokio::test]
    async fn test_username_taken() -> TestResult {
        let mut users = MockUserService::new();

        users
            .expect_username_available()
            .times(1)
            .returning(|_| Ok(false));

        let state = test_state(Some(users), None, None);

        let response = TestServer::new(router(state))?
            .get("/api/v1/users/username-availability")
            .add_query_param("username", "alice")
            .await;

        let json = response.json::<UsernameAvailabilityResponse>();

        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(!json.available);

        Ok(())
    }

    #[tokio::test]
    async fn test_username_invalid() -> TestResult {
        let state = test_state(None, None, None);

        let response = TestServer::new(router(state))?
            .get("/api/v1/users/username-availability")
            .add_query_param("username", "a")
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json.error, "Username must be at least 2 characters long");

        Ok(())
    }
}
