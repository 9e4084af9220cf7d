//! Postgres implementation of the MessageRepository trait

use anyhow::{anyhow, Error};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    domain::messaging::messages::{Message, MessageContent, MessageRepository},
    infrastructure::database::postgres::PostgresDatabase,
};

#[derive(FromRow)]
struct MessageRecord {
    id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Message {
            id: record.id,
            content: MessageContent::new_unchecked(&record.content),
            created_at: record.created_at,
        }
    }
}

fn unknown(err: sqlx::Error) -> Error {
    anyhow!("Unknown database error: {:?}", err)
}

#[async_trait]
impl MessageRepository for PostgresDatabase {
    #[mutants::skip]
    async fn append_message(&self, user_id: &Uuid, message: &Message) -> Result<(), Error> {
        sqlx::query("INSERT INTO messages (id, user_id, content, created_at) VALUES ($1, $2, $3, $4)")
            .bind(message.id)
            .bind(user_id)
            .bind(message.content.as_str())
            .bind(message.created_at)
            .execute(&self.pool)
            .await
            .map_err(unknown)?;

        Ok(())
    }

    #[mutants::skip]
    async fn list_messages(&self, user_id: &Uuid) -> Result<Vec<Message>, Error> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, content, created_at
            FROM messages
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unknown)?;

        Ok(records.into_iter().map(Message::from).collect())
    }

    #[mutants::skip]
    async fn delete_message(&self, user_id: &Uuid, message_id: &Uuid) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM messages WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(message_id)
            .execute(&self.pool)
            .await
            .map_err(unknown)?;

        Ok(result.rows_affected() > 0)
    }
}
