//! Sign-in sessions backing the per-request identity.

mod repository;
mod service;

pub mod errors;

pub use repository::SessionRepository;
pub use service::{SessionService, SessionServiceImpl};
