//! Postgres implementation of the UserRepository trait

use anyhow::{anyhow, Error};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    domain::{
        auth::users::{
            errors::{GetUserError, RegisterUserError, UpdateUserError},
            Credentials, NewRegistration, User, UserRepository, Username, VerifyCode,
        },
        communication::email_addresses::EmailAddress,
    },
    infrastructure::database::postgres::PostgresDatabase,
};

#[derive(FromRow)]
struct UserRecord {
    id: Uuid,
    username: String,
    email: String,
    verify_code: Option<String>,
    verify_code_expires_at: Option<DateTime<Utc>>,
    is_verified: bool,
    is_accepting_messages: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRecord> for User {
    type Error = Error;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let verify_code = record
            .verify_code
            .as_deref()
            .map(VerifyCode::new)
            .transpose()
            .map_err(Error::new)?;

        Ok(User {
            id: record.id,
            username: Username::new_unchecked(&record.username),
            email: EmailAddress::new_unchecked(&record.email),
            verify_code,
            verify_code_expires_at: record.verify_code_expires_at,
            is_verified: record.is_verified,
            is_accepting_messages: record.is_accepting_messages,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, username, email, verify_code, verify_code_expires_at, \
                            is_verified, is_accepting_messages, created_at, updated_at";

fn unknown(err: sqlx::Error) -> Error {
    anyhow!("Unknown database error: {:?}", err)
}

#[async_trait]
impl UserRepository for PostgresDatabase {
    #[mutants::skip]
    async fn upsert_unverified(
        &self,
        registration: &NewRegistration,
        code: &VerifyCode,
        code_expires_at: DateTime<Utc>,
    ) -> Result<Uuid, RegisterUserError> {
        let username_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 AND is_verified)",
        )
        .bind(registration.username().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(unknown)?;

        if username_taken {
            return Err(RegisterUserError::UsernameTaken);
        }

        let existing = sqlx::query_as::<_, (Uuid, bool)>(
            "SELECT id, is_verified FROM users WHERE email = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(registration.email().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unknown)?;

        match existing {
            Some((_, true)) => Err(RegisterUserError::EmailTaken),
            Some((id, false)) => {
                sqlx::query(
                    r#"
                    UPDATE users
                    SET username = $2,
                        password_hash = $3,
                        verify_code = $4,
                        verify_code_expires_at = $5,
                        updated_at = now()
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .bind(registration.username().as_str())
                .bind(registration.password_hash())
                .bind(code.as_str())
                .bind(code_expires_at)
                .execute(&self.pool)
                .await
                .map_err(unknown)?;

                Ok(id)
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO users
                        (id, username, email, password_hash, verify_code,
                         verify_code_expires_at, is_verified, is_accepting_messages)
                    VALUES ($1, $2, $3, $4, $5, $6, FALSE, TRUE)
                    "#,
                )
                .bind(registration.id())
                .bind(registration.username().as_str())
                .bind(registration.email().as_str())
                .bind(registration.password_hash())
                .bind(code.as_str())
                .bind(code_expires_at)
                .execute(&self.pool)
                .await
                .map_err(unknown)?;

                Ok(*registration.id())
            }
        }
    }

    #[mutants::skip]
    async fn get_user_by_id(&self, id: &Uuid) -> Result<User, GetUserError> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unknown)?
        .ok_or(GetUserError::UserNotFound)?;

        Ok(record.try_into()?)
    }

    #[mutants::skip]
    async fn get_user_by_username(&self, username: &Username) -> Result<User, GetUserError> {
        // Unverified registrations may share a username; prefer the verified
        // owner, then the oldest claim.
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 \
             ORDER BY is_verified DESC, created_at LIMIT 1"
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unknown)?
        .ok_or(GetUserError::UserNotFound)?;

        Ok(record.try_into()?)
    }

    #[mutants::skip]
    async fn verified_username_exists(&self, username: &Username) -> Result<bool, Error> {
        Ok(sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 AND is_verified)",
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(unknown)?)
    }

    #[mutants::skip]
    async fn mark_verified(&self, id: &Uuid) -> Result<(), UpdateUserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_verified = TRUE,
                verify_code = NULL,
                verify_code_expires_at = NULL,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(unknown)?;

        if result.rows_affected() == 0 {
            return Err(UpdateUserError::UserNotFound);
        }

        Ok(())
    }

    #[mutants::skip]
    async fn set_accepting_messages(
        &self,
        id: &Uuid,
        accepting: bool,
    ) -> Result<(), UpdateUserError> {
        let result =
            sqlx::query("UPDATE users SET is_accepting_messages = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(accepting)
                .execute(&self.pool)
                .await
                .map_err(unknown)?;

        if result.rows_affected() == 0 {
            return Err(UpdateUserError::UserNotFound);
        }

        Ok(())
    }

    #[mutants::skip]
    async fn find_credentials(&self, identifier: &str) -> Result<Option<Credentials>, Error> {
        let record = sqlx::query_as::<_, (Uuid, String, String, bool)>(
            r#"
            SELECT id, username, password_hash, is_verified
            FROM users
            WHERE username = $1 OR email = $1
            ORDER BY is_verified DESC
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(unknown)?;

        Ok(record.map(|(user_id, username, password_hash, is_verified)| Credentials {
            user_id,
            username: Username::new_unchecked(&username),
            password_hash,
            is_verified,
        }))
    }
}
