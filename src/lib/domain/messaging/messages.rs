//! This module contains the message model and the inbox operations.

mod content;
mod message;
mod repository;
mod service;

pub mod errors;

pub use content::{MessageContent, MessageContentError};
pub use message::Message;
pub use repository::MessageRepository;
pub use service::{MessageService, MessageServiceImpl};

#[cfg(test)]
pub mod tests {
    pub use super::repository::MockMessageRepository;
    pub use super::service::MockMessageService;
}
