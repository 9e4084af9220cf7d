//! Anonymous messages and the per-user inbox.

pub mod messages;
