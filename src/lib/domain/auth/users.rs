//! This module contains the user model and its related functions.

mod password;
mod repository;
mod service;
mod user;
mod username;
mod verify_code;

pub mod errors;

pub use password::{Password, PasswordError};
pub use repository::UserRepository;
pub use service::{UserService, UserServiceImpl};
pub use user::{Credentials, NewRegistration, User};
pub use username::{Username, UsernameError};
pub use verify_code::{VerifyCode, VerifyCodeParseError};
