//! Registration, verification and session handlers

pub mod register;
pub mod sign_in;
pub mod sign_out;
pub mod username_availability;
pub mod verify_code;
