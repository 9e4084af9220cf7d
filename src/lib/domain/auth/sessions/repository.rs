//! Session repository module

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(test)]
use mockall::mock;

use crate::domain::auth::identity::Identity;

/// Session repository. Stores only token digests, never clear tokens.
#[async_trait]
pub trait SessionRepository: Clone + Send + Sync + 'static {
    /// Store a new session for the user
    async fn create_session(
        &self,
        user_id: &Uuid,
        token_digest: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), anyhow::Error>;

    /// Resolve a token digest to the identity of an unexpired session
    async fn find_identity_by_digest(
        &self,
        token_digest: &str,
    ) -> Result<Option<Identity>, anyhow::Error>;

    /// Delete the session with the given token digest, if any
    async fn delete_session(&self, token_digest: &str) -> Result<(), anyhow::Error>;
}

#[cfg(test)]
mock! {
    pub SessionRepository {}

    impl Clone for SessionRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl SessionRepository for SessionRepository {
        async fn create_session(
            &self,
            user_id: &Uuid,
            token_digest: &str,
            expires_at: DateTime<Utc>,
        ) -> Result<(), anyhow::Error>;
        async fn find_identity_by_digest(&self, token_digest: &str) -> Result<Option<Identity>, anyhow::Error>;
        async fn delete_session(&self, token_digest: &str) -> Result<(), anyhow::Error>;
    }
}
