//! User listing and lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vitals_models::{db::connection::DbConnection, users::user::User};

use crate::{extract::parse_id, prelude::*};

/// Public view of a user. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub username: String,
    pub user_since: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            username: user.user_name,
            user_since: user.created_at,
        }
    }
}

pub fn list_users(connection: &DbConnection) -> Result<Vec<UserResponse>> {
    Ok(User::fetch_all(connection)?
        .into_iter()
        .map(UserResponse::from)
        .collect())
}

pub fn get_user(raw_id: &str, connection: &DbConnection) -> Result<UserResponse> {
    let id = parse_id(raw_id, "user")?;
    User::fetch_by_id(id, connection)?
        .map(UserResponse::from)
        .ok_or(Error::NotFound("User"))
}
