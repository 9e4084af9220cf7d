//! Inbox and anonymous-submission handlers

pub mod accept_messages;
pub mod delete_message;
pub mod list_messages;
pub mod submit_message;
