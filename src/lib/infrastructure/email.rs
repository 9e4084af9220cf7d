//! Email module

pub mod smtp;
