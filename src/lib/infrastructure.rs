//! Infrastructure layer: Postgres, SMTP and the HTTP servers.

pub mod database;
pub mod email;
pub mod http;
