//! Per-request identity

use uuid::Uuid;

use crate::domain::auth::users::Username;

/// The authenticated identity attached to a request.
///
/// Supplied explicitly to every operation that needs an ownership check;
/// there is no ambient or global session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    /// The authenticated user's UUID
    pub user_id: Uuid,

    /// The authenticated user's public name
    pub username: Username,
}
