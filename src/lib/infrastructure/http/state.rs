//! Application state module

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    auth::{sessions::SessionService, users::UserService},
    messaging::messages::MessageService,
};

/// Application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// The base URL of the application
    pub base_url: String,
}

/// Global application state
#[derive(Clone)]
pub struct AppState<U: UserService, S: SessionService, M: MessageService> {
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// The application configuration
    pub config: AppConfig,

    /// User service
    pub users: Arc<U>,

    /// Session service
    pub sessions: Arc<S>,

    /// Message service
    pub messages: Arc<M>,
}

impl<U, S, M> AppState<U, S, M>
where
    U: UserService,
    S: SessionService,
    M: MessageService,
{
    /// Create a new application state
    pub fn new(config: AppConfig, users: U, sessions: S, messages: M) -> Self {
        Self {
            start_time: Utc::now(),
            config,
            users: Arc::new(users),
            sessions: Arc::new(sessions),
            messages: Arc::new(messages),
        }
    }
}

impl<U, S, M> fmt::Debug for AppState<U, S, M>
where
    U: UserService,
    S: SessionService,
    M: MessageService,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("config", &self.config)
            .field("users", &"UserService")
            .field("sessions", &"SessionService")
            .field("messages", &"MessageService")
            .finish()
    }
}
