//! User model

use chrono::{DateTime, Utc};
use password_auth::generate_hash;
use uuid::Uuid;

use crate::domain::{
    auth::users::{Password, Username, VerifyCode},
    communication::email_addresses::EmailAddress,
};

/// User model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// User UUID
    pub id: Uuid,

    /// The user's public name
    pub username: Username,

    /// The user's email address
    pub email: EmailAddress,

    /// The pending one-time verification code, present only while the user
    /// is unverified
    pub verify_code: Option<VerifyCode>,

    /// When the pending verification code stops being accepted
    pub verify_code_expires_at: Option<DateTime<Utc>>,

    /// Whether the user has proven control of their email address
    pub is_verified: bool,

    /// Whether anonymous message submission is currently open
    pub is_accepting_messages: bool,

    /// User created at date in UTC
    pub created_at: DateTime<Utc>,

    /// User last updated at date in UTC
    pub updated_at: DateTime<Utc>,
}

/// The credentials needed to sign a user in
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// The user's UUID
    pub user_id: Uuid,

    /// The user's public name
    pub username: Username,

    /// The user's password hash
    pub password_hash: String,

    /// Whether the user has completed email verification
    pub is_verified: bool,
}

/// A registration request, the input to the verification-code lifecycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRegistration {
    /// ID assigned if the registration creates a new user
    id: Uuid,

    /// The requested username
    username: Username,

    /// The email address the verification code is sent to
    email: EmailAddress,

    /// The new user's password hash
    password_hash: String,
}

impl NewRegistration {
    /// Create a new registration request, hashing the supplied password.
    pub fn new(id: Uuid, username: Username, email: EmailAddress, password: Password) -> Self {
        let password_hash = generate_hash(password.as_bytes());

        Self {
            id,
            username,
            email,
            password_hash,
        }
    }

    /// Get the registration's ID
    pub fn id(&self) -> &Uuid {
        &self.id
    }

    /// Get the requested username
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Get the registration's email address
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Get the password hash
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}
