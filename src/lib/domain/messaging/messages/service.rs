//! Message service module

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    auth::users::{UserRepository, Username},
    messaging::messages::{
        errors::{DeleteMessageError, ListMessagesError, SubmitMessageError},
        Message, MessageContent, MessageRepository,
    },
};

/// Message service: anonymous intake, inbox listing and deletion.
#[async_trait]
pub trait MessageService: Clone + Send + Sync + 'static {
    /// Accepts an anonymous message for the named user.
    ///
    /// No authentication is required or performed; anonymity is by design.
    /// The message is accepted only when the user exists and their
    /// acceptance gate is open at the time of submission.
    async fn submit_message(
        &self,
        username: &Username,
        content: MessageContent,
    ) -> Result<Message, SubmitMessageError>;

    /// All messages owned by the user, strictly newest-first. A user with no
    /// messages gets an empty list, not an error.
    async fn list_messages(&self, user_id: &Uuid) -> Result<Vec<Message>, ListMessagesError>;

    /// Deletes the owner's message by id.
    async fn delete_message(
        &self,
        user_id: &Uuid,
        message_id: &Uuid,
    ) -> Result<(), DeleteMessageError>;
}

#[cfg(test)]
mock! {
    pub MessageService {}

    impl Clone for MessageService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl MessageService for MessageService {
        async fn submit_message(
            &self,
            username: &Username,
            content: MessageContent,
        ) -> Result<Message, SubmitMessageError>;
        async fn list_messages(&self, user_id: &Uuid) -> Result<Vec<Message>, ListMessagesError>;
        async fn delete_message(&self, user_id: &Uuid, message_id: &Uuid) -> Result<(), DeleteMessageError>;
    }
}

/// Message service implementation
#[derive(Debug, Clone)]
pub struct MessageServiceImpl<R, U>
where
    R: MessageRepository,
    U: UserRepository,
{
    repo: Arc<R>,
    users: Arc<U>,
}

impl<R, U> MessageServiceImpl<R, U>
where
    R: MessageRepository,
    U: UserRepository,
{
    /// Create a new message service
    pub fn new(repo: Arc<R>, users: Arc<U>) -> Self {
        Self { repo, users }
    }
}

#[async_trait]
impl<R, U> MessageService for MessageServiceImpl<R, U>
where
    R: MessageRepository,
    U: UserRepository,
{
    async fn submit_message(
        &self,
        username: &Username,
        content: MessageContent,
    ) -> Result<Message, SubmitMessageError> {
        let user = self.users.get_user_by_username(username).await?;

        if !user.is_accepting_messages {
            return Err(SubmitMessageError::MessagesClosed);
        }

        let message = Message::accept_now(content);

        self.repo.append_message(&user.id, &message).await?;

        Ok(message)
    }

    async fn list_messages(&self, user_id: &Uuid) -> Result<Vec<Message>, ListMessagesError> {
        // Distinguish an empty inbox from a missing user.
        self.users.get_user_by_id(user_id).await?;

        Ok(self.repo.list_messages(user_id).await?)
    }

    async fn delete_message(
        &self,
        user_id: &Uuid,
        message_id: &Uuid,
    ) -> Result<(), DeleteMessageError> {
        let deleted = self.repo.delete_message(user_id, message_id).await?;

        if !deleted {
            return Err(DeleteMessageError::MessageNotFound);
        }

        Ok(())
    }
}
