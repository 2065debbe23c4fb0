//! Login, token validation and token refresh.
//!
//! Failures that depend on who the caller is (unknown user, wrong password)
//! all produce the same error, so a client cannot probe for usernames.
//!
//! An unknown username is checked against an Argon2 decoy, which matches the
//! cost of a wrong password for an Argon2 account. Legacy bcrypt hashes are
//! replaced with Argon2 ones on the first successful login, after which the
//! account costs the same as any other.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use vitals_auth::{
    config::AuthConfig,
    secret_hash::{generate_password_hash, needs_rehash, verify_password},
};
use vitals_models::{db::connection::DbConnection, users::user::User};

use crate::prelude::*;

/// Hash checked when the username is unknown, so that both login failures
/// cost one Argon2 verification.
static DECOY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| generate_password_hash("decoy-password").ok());

/// Lookups the session endpoints need from the user store.
pub trait UserStore {
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Both must match the same row.
    fn find_by_id_and_username(&self, id: i64, username: &str) -> Result<Option<User>>;

    fn update_password_hash(&self, id: i64, hash: &str) -> Result<()>;
}

impl UserStore for DbConnection {
    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(User::fetch_by_username(username, self)?)
    }

    fn find_by_id_and_username(&self, id: i64, username: &str) -> Result<Option<User>> {
        Ok(User::fetch_by_id_and_username(id, username, self)?)
    }

    fn update_password_hash(&self, id: i64, hash: &str) -> Result<()> {
        User::update_password_hash(id, hash, self)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateTokenResponse {
    pub id: u64,
    pub username: String,
}

/// Checks the credentials and issues a token for the user.
///
/// Verification is CPU-heavy; async callers should run this on a blocking
/// thread.
pub fn login(
    request: &LoginRequest,
    store: &impl UserStore,
    auth: &AuthConfig,
) -> Result<TokenResponse> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(Error::MissingCredentials);
    }

    let Some(user) = store.find_by_username(&request.username)? else {
        if let Some(decoy) = DECOY_HASH.as_deref() {
            let _ = verify_password(&request.password, decoy);
        }
        debug!("Login failed: no such user");
        return Err(Error::InvalidCredentials);
    };

    if !verify_password(&request.password, &user.password_hash) {
        debug!("Login failed for user {}: wrong password", user.id);
        return Err(Error::InvalidCredentials);
    }

    if needs_rehash(&user.password_hash) {
        upgrade_password_hash(&user, &request.password, store);
    }

    let response = issue_for(&user, auth)?;
    info!("User {} logged in", user.id);
    Ok(response)
}

/// Returns the identity a token carries.
pub fn validate_token(request: &TokenRequest, auth: &AuthConfig) -> Result<ValidateTokenResponse> {
    let identity = auth.parse(&request.token).map_err(|err| {
        debug!("Token validation failed: {err}");
        Error::InvalidToken
    })?;

    Ok(ValidateTokenResponse {
        id: identity.user_id,
        username: identity.username,
    })
}

/// Exchanges a valid token for a fresh one, provided its user still exists.
pub fn refresh_token(
    request: &TokenRequest,
    store: &impl UserStore,
    auth: &AuthConfig,
) -> Result<TokenResponse> {
    let identity = auth.parse(&request.token).map_err(|err| {
        debug!("Token refresh failed: {err}");
        Error::InvalidToken
    })?;
    let user_id = i64::try_from(identity.user_id).map_err(|_| Error::InvalidToken)?;

    let Some(user) = store.find_by_id_and_username(user_id, &identity.username)? else {
        debug!("Token refresh failed: user {user_id} no longer exists");
        return Err(Error::InvalidToken);
    };

    issue_for(&user, auth)
}

/// Stores an Argon2 hash of a password that just verified against a legacy
/// hash. Failures are logged and do not affect the login.
fn upgrade_password_hash(user: &User, password: &str, store: &impl UserStore) {
    let result = generate_password_hash(password)
        .map_err(Error::from)
        .and_then(|hash| store.update_password_hash(user.id, &hash));

    match result {
        Ok(()) => info!("Upgraded password hash of user {}", user.id),
        Err(err) => warn!("Failed to upgrade password hash of user {}: {err}", user.id),
    }
}

fn issue_for(user: &User, auth: &AuthConfig) -> Result<TokenResponse> {
    let user_id = u64::try_from(user.id)
        .map_err(|_| Error::Internal(format!("user id {} cannot be encoded", user.id)))?;

    let token = auth.issue(&user.user_name, user_id).map_err(|err| {
        error!("Failed to issue a token for user {}: {err}", user.id);
        err
    })?;

    Ok(TokenResponse { token })
}
