//! Process-wide authentication configuration.
//!
//! The signing key and the token duration are read from the environment the
//! first time [`AuthConfig::global`] is called and kept for the lifetime of
//! the process.
//!
//! * `JWT_KEY` - token signing secret. When unset, a random key is generated;
//!   tokens signed with it become unverifiable after a restart.
//! * `DURATION_SEC` - token lifetime in seconds. Defaults to 6 hours when
//!   unset, malformed or not positive.

use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::TimeDelta;
use rand::{Rng, distributions::Alphanumeric, rngs::OsRng};
use tracing::{info, warn};

use crate::jwt::{self, Identity};
use crate::prelude::*;

pub const JWT_KEY_ENV: &str = "JWT_KEY";
pub const DURATION_ENV: &str = "DURATION_SEC";

/// Token lifetime used when `DURATION_SEC` is not usable.
pub const DEFAULT_TOKEN_DURATION: TimeDelta = TimeDelta::hours(6);

const GENERATED_KEY_LEN: usize = 32;

static AUTH_CONFIG: LazyLock<AuthConfig> = LazyLock::new(AuthConfig::from_env);

/// Signing key and token lifetime used to issue and verify tokens.
#[derive(Clone)]
pub struct AuthConfig {
    secret: Arc<[u8]>,
    token_duration: TimeDelta,
}

impl AuthConfig {
    pub fn new(secret: impl AsRef<[u8]>, token_duration: TimeDelta) -> Self {
        Self {
            secret: Arc::from(secret.as_ref()),
            token_duration,
        }
    }

    /// The configuration shared by the whole process.
    ///
    /// Initialized exactly once, even under concurrent first access.
    pub fn global() -> &'static AuthConfig {
        &AUTH_CONFIG
    }

    /// Reads `JWT_KEY` and `DURATION_SEC` from the environment.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(JWT_KEY_ENV).ok(),
            std::env::var(DURATION_ENV).ok(),
        )
    }

    /// Builds the configuration from raw setting values, applying fallbacks.
    pub fn from_values(key: Option<String>, duration: Option<String>) -> Self {
        let secret = match key.filter(|key| !key.is_empty()) {
            Some(key) => key,
            None => {
                warn!("{JWT_KEY_ENV} is not set, generating a random signing key");
                warn!("Tokens issued by this process will not survive a restart");
                generate_key()
            }
        };

        Self::new(secret, parse_duration(duration.as_deref()))
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn token_duration(&self) -> TimeDelta {
        self.token_duration
    }

    /// Issues a token for the given user with the configured lifetime.
    pub fn issue(&self, username: &str, user_id: u64) -> Result<String> {
        jwt::issue(&self.secret, username, user_id, self.token_duration)
    }

    /// Verifies a token signed with this configuration's key.
    pub fn parse(&self, token: &str) -> Result<Identity> {
        jwt::parse(&self.secret, token)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"REDACTED")
            .field("token_duration", &self.token_duration)
            .finish()
    }
}

fn parse_duration(value: Option<&str>) -> TimeDelta {
    let seconds = value
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|seconds| *seconds > 0)
        .and_then(TimeDelta::try_seconds);

    match seconds {
        Some(duration) => {
            info!("Token expiration set to {} seconds", duration.num_seconds());
            duration
        }
        None => {
            warn!(
                "{DURATION_ENV} is missing or invalid, using the default of {} seconds",
                DEFAULT_TOKEN_DURATION.num_seconds()
            );
            DEFAULT_TOKEN_DURATION
        }
    }
}

fn generate_key() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(GENERATED_KEY_LEN)
        .map(char::from)
        .collect()
}
