//! Request extractors

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::{
    domain::{
        auth::{identity::Identity, sessions::SessionService, users::UserService},
        messaging::messages::MessageService,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Pull the bearer token out of the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::new_401("Unauthorized"))
}

/// Resolves the request's bearer token to the authenticated [`Identity`].
///
/// Handlers take the identity as an explicit argument; there is no ambient
/// session state.
#[async_trait]
impl<U, S, M> FromRequestParts<AppState<U, S, M>> for Identity
where
    U: UserService,
    S: SessionService,
    M: MessageService,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<U, S, M>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        Ok(state.sessions.identify(token).await?)
    }
}
