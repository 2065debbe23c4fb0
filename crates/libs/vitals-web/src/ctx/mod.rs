//! Request context for authenticated handlers.

use vitals_auth::jwt::Identity;

pub mod resolver;

/// The caller's verified identity, as carried by their bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    pub user_id: u64,
    pub username: String,
}

impl From<Identity> for Ctx {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            username: identity.username,
        }
    }
}
