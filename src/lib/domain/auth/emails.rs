//! Emails sent during the account lifecycle.

pub mod verification_code;
