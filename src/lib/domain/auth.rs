//! Users, registration, verification and sessions.

pub mod emails;
pub mod identity;
pub mod sessions;
pub mod users;
