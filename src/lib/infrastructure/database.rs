//! Database module

pub mod postgres;
