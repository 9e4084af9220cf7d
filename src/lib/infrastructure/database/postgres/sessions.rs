//! Postgres implementation of the SessionRepository trait

use anyhow::{anyhow, Error};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    domain::auth::{
        identity::Identity,
        sessions::SessionRepository,
        users::Username,
    },
    infrastructure::database::postgres::PostgresDatabase,
};

fn unknown(err: sqlx::Error) -> Error {
    anyhow!("Unknown database error: {:?}", err)
}

#[async_trait]
impl SessionRepository for PostgresDatabase {
    #[mutants::skip]
    async fn create_session(
        &self,
        user_id: &Uuid,
        token_digest: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), Error> {
        sqlx::query("INSERT INTO sessions (token_digest, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(token_digest)
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(unknown)?;

        Ok(())
    }

    #[mutants::skip]
    async fn find_identity_by_digest(&self, token_digest: &str) -> Result<Option<Identity>, Error> {
        let record = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT users.id, users.username
            FROM sessions
            JOIN users ON users.id = sessions.user_id
            WHERE sessions.token_digest = $1 AND sessions.expires_at > now()
            "#,
        )
        .bind(token_digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(unknown)?;

        Ok(record.map(|(user_id, username)| Identity {
            user_id,
            username: Username::new_unchecked(&username),
        }))
    }

    #[mutants::skip]
    async fn delete_session(&self, token_digest: &str) -> Result<(), Error> {
        sqlx::query("DELETE FROM sessions WHERE token_digest = $1")
            .bind(token_digest)
            .execute(&self.pool)
            .await
            .map_err(unknown)?;

        Ok(())
    }
}
