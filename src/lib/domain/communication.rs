//! Outbound communication with users.

pub mod email_addresses;
pub mod mailer;
