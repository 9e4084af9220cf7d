//! User repository module

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(test)]
use mockall::mock;

use crate::domain::auth::users::{
    errors::{GetUserError, RegisterUserError, UpdateUserError},
    Credentials, NewRegistration, User, Username, VerifyCode,
};

/// User repository
///
/// The store provides per-row atomicity; no application-level locking is
/// layered on top.
#[async_trait]
pub trait UserRepository: Clone + Send + Sync + 'static {
    /// Store a registration attempt.
    ///
    /// Fails with [`RegisterUserError::UsernameTaken`] or
    /// [`RegisterUserError::EmailTaken`] when a **verified** user already
    /// owns the field. An unverified record matching the email is
    /// overwritten with the new username, password hash, code and expiry;
    /// otherwise a new unverified user is inserted with messages open.
    async fn upsert_unverified(
        &self,
        registration: &NewRegistration,
        code: &VerifyCode,
        code_expires_at: DateTime<Utc>,
    ) -> Result<Uuid, RegisterUserError>;

    /// Get a user by their ID
    async fn get_user_by_id(&self, id: &Uuid) -> Result<User, GetUserError>;

    /// Get a user by their exact username
    async fn get_user_by_username(&self, username: &Username) -> Result<User, GetUserError>;

    /// Whether a verified user owns the username
    async fn verified_username_exists(&self, username: &Username) -> Result<bool, anyhow::Error>;

    /// Mark the user verified and clear the consumed verification code
    async fn mark_verified(&self, id: &Uuid) -> Result<(), UpdateUserError>;

    /// Set whether the user accepts anonymous messages
    async fn set_accepting_messages(
        &self,
        id: &Uuid,
        accepting: bool,
    ) -> Result<(), UpdateUserError>;

    /// Find sign-in credentials by username or email address
    async fn find_credentials(&self, identifier: &str)
        -> Result<Option<Credentials>, anyhow::Error>;
}

#[cfg(test)]
mock! {
    pub UserRepository {}

    impl Clone for UserRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl UserRepository for UserRepository {
        async fn upsert_unverified(
            &self,
            registration: &NewRegistration,
            code: &VerifyCode,
            code_expires_at: DateTime<Utc>,
        ) -> Result<Uuid, RegisterUserError>;
        async fn get_user_by_id(&self, id: &Uuid) -> Result<User, GetUserError>;
        async fn get_user_by_username(&self, username: &Username) -> Result<User, GetUserError>;
        async fn verified_username_exists(&self, username: &Username) -> Result<bool, anyhow::Error>;
        async fn mark_verified(&self, id: &Uuid) -> Result<(), UpdateUserError>;
        async fn set_accepting_messages(&self, id: &Uuid, accepting: bool) -> Result<(), UpdateUserError>;
        async fn find_credentials(&self, identifier: &str) -> Result<Option<Credentials>, anyhow::Error>;
    }
}
