//! Message repository module

use async_trait::async_trait;
use uuid::Uuid;

#[cfg(test)]
use mockall::mock;

use crate::domain::messaging::messages::Message;

/// Message repository. Messages are an owned collection: every operation is
/// scoped to the owning user's id.
#[async_trait]
pub trait MessageRepository: Clone + Send + Sync + 'static {
    /// Append an accepted message to the user's collection
    async fn append_message(&self, user_id: &Uuid, message: &Message)
        -> Result<(), anyhow::Error>;

    /// All messages owned by the user, most recent first
    async fn list_messages(&self, user_id: &Uuid) -> Result<Vec<Message>, anyhow::Error>;

    /// Delete the matching message. Returns whether a row was removed, so a
    /// miss is distinguishable from a store failure.
    async fn delete_message(
        &self,
        user_id: &Uuid,
        message_id: &Uuid,
    ) -> Result<bool, anyhow::Error>;
}

#[cfg(test)]
mock! {
    pub MessageRepository {}

    impl Clone for MessageRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl MessageRepository for MessageRepository {
        async fn append_message(&self, user_id: &Uuid, message: &Message) -> Result<(), anyhow::Error>;
        async fn list_messages(&self, user_id: &Uuid) -> Result<Vec<Message>, anyhow::Error>;
        async fn delete_message(&self, user_id: &Uuid, message_id: &Uuid) -> Result<bool, anyhow::Error>;
    }
}
