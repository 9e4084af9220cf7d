//! HTTP handlers

pub mod v1;
