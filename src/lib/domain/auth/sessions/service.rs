//! Session service module

use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use chrono::{Duration, Utc};
use password_auth::verify_password;
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

#[cfg(test)]
use mockall::mock;

use crate::domain::auth::{
    identity::Identity,
    sessions::{
        errors::{IdentifySessionError, SignInError},
        SessionRepository,
    },
    users::UserRepository,
};

/// How long a session stays valid after sign-in.
const SESSION_VALIDITY_DAYS: i64 = 30;

/// Session service: mints opaque bearer tokens at sign-in and resolves them
/// to a per-request [`Identity`].
#[async_trait]
pub trait SessionService: Clone + Send + Sync + 'static {
    /// Signs a user in with their username or email address plus password.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the clear session token. The
    /// token is returned exactly once; only its digest is stored.
    async fn sign_in(&self, identifier: &str, password: &str) -> Result<String, SignInError>;

    /// Resolves a bearer token to the identity it was minted for.
    async fn identify(&self, token: &str) -> Result<Identity, IdentifySessionError>;

    /// Ends the session for the given token. Unknown tokens are a no-op.
    async fn sign_out(&self, token: &str) -> Result<(), anyhow::Error>;
}

#[cfg(test)]
mock! {
    pub SessionService {}

    impl Clone for SessionService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl SessionService for SessionService {
        async fn sign_in(&self, identifier: &str, password: &str) -> Result<String, SignInError>;
        async fn identify(&self, token: &str) -> Result<Identity, IdentifySessionError>;
        async fn sign_out(&self, token: &str) -> Result<(), anyhow::Error>;
    }
}

/// Session service implementation
#[derive(Debug, Clone)]
pub struct SessionServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    users: Arc<U>,
    sessions: Arc<S>,
}

impl<U, S> SessionServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// Create a new session service
    pub fn new(users: Arc<U>, sessions: Arc<S>) -> Self {
        Self { users, sessions }
    }
}

/// Digest a clear token for storage and lookup.
fn digest_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());

    URL_SAFE.encode(hasher.finalize())
}

#[async_trait]
impl<U, S> SessionService for SessionServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    async fn sign_in(&self, identifier: &str, password: &str) -> Result<String, SignInError> {
        let credentials = self
            .users
            .find_credentials(identifier)
            .await?
            .ok_or(SignInError::InvalidCredentials)?;

        verify_password(password, &credentials.password_hash)
            .map_err(|_| SignInError::InvalidCredentials)?;

        if !credentials.is_verified {
            return Err(SignInError::NotVerified);
        }

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();

        let expires_at = Utc::now() + Duration::days(SESSION_VALIDITY_DAYS);

        self.sessions
            .create_session(&credentials.user_id, &digest_token(&token), expires_at)
            .await?;

        Ok(token)
    }

    async fn identify(&self, token: &str) -> Result<Identity, IdentifySessionError> {
        self.sessions
            .find_identity_by_digest(&digest_token(token))
            .await?
            .ok_or(IdentifySessionError::SessionNotFound)
    }

    async fn sign_out(&self, token: &str) -> Result<(), anyhow::Error> {
        self.sessions.delete_session(&digest_token(token)).await
    }
}
