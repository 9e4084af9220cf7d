//! Domain layer: models, value objects, services and repository contracts.

pub mod auth;
pub mod communication;
pub mod messaging;
