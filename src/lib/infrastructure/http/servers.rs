//! HTTP and HTTPS servers

pub mod http;
pub mod https;
