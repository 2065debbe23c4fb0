//! Identity tokens for the vitals server.
//!
//! Tokens are HS256-signed JWTs carrying the user id, the username, an
//! `authorized` flag and an expiry timestamp. They are self-contained: there
//! is no server-side registry, so a token stays valid until it expires or the
//! signing key changes.
//!
//! # Usage
//!
//! - [`issue`]: create a signed token for an identity
//! - [`parse`]: verify a token and recover the identity it carries
//!
//! Both have `_at` variants taking an explicit "now", which is what the
//! wall-clock versions delegate to.
//!
//! # Examples
//!
//! ```rust
//! use chrono::TimeDelta;
//! use vitals_auth::jwt::{issue, parse};
//!
//! let secret = b"MySuperSecret";
//! let token = issue(secret, "alice", 42, TimeDelta::seconds(3600)).unwrap();
//!
//! let identity = parse(secret, &token).unwrap();
//! assert_eq!(identity.username, "alice");
//! assert_eq!(identity.user_id, 42);
//!
//! assert!(parse(b"AnotherSecret", &token).is_err());
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::prelude::*;

/// JWT signing algorithm used for every token.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// The verified identity carried by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: u64,
    pub username: String,
}

/// Claim set encoded in every token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Always `true` for tokens issued by this crate.
    pub authorized: bool,
    #[serde(rename = "user")]
    pub username: String,
    #[serde(rename = "id")]
    pub user_id: u64,
    /// Issued at.
    #[serde(default)]
    pub iat: i64,
    /// Expiration time.
    pub exp: i64,
}

impl Claims {
    /// Builds the claims for `username`/`user_id`, expiring `duration` after `now`.
    pub fn new(username: &str, user_id: u64, duration: TimeDelta, now: DateTime<Utc>) -> Result<Self> {
        let expiration = now
            .checked_add_signed(duration)
            .ok_or(Error::ExpirationOutOfRange)?;

        Ok(Self {
            authorized: true,
            username: String::from(username),
            user_id,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        })
    }
}

/// Issues a token for `username`/`user_id` valid for `duration` from now.
///
/// # Errors
///
/// Fails only if the expiry overflows or the token cannot be signed.
pub fn issue(secret: &[u8], username: &str, user_id: u64, duration: TimeDelta) -> Result<String> {
    issue_at(secret, username, user_id, duration, Utc::now())
}

/// Same as [`issue`] with an explicit issuance time.
pub fn issue_at(
    secret: &[u8],
    username: &str,
    user_id: u64,
    duration: TimeDelta,
    now: DateTime<Utc>,
) -> Result<String> {
    let claims = Claims::new(username, user_id, duration, now)?;
    Ok(encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret),
    )?)
}

/// Verifies `token` and returns the identity it carries.
///
/// # Errors
///
/// * [`Error::InvalidToken`] - bad signature, wrong algorithm, malformed token
///   or a claim set that was not issued as authorized
/// * [`Error::TokenExpired`] - the expiry timestamp is in the past
pub fn parse(secret: &[u8], token: &str) -> Result<Identity> {
    parse_at(secret, token, Utc::now())
}

/// Same as [`parse`], checking expiry against `now` instead of the wall clock.
pub fn parse_at(secret: &[u8], token: &str, now: DateTime<Utc>) -> Result<Identity> {
    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation())
        .map_err(|err| {
            debug!("Rejected token: {err}");
            Error::InvalidToken
        })?
        .claims;

    if claims.exp < now.timestamp() {
        return Err(Error::TokenExpired);
    }
    if !claims.authorized {
        return Err(Error::InvalidToken);
    }

    Ok(Identity {
        user_id: claims.user_id,
        username: claims.username,
    })
}

fn validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    // Expiry is compared against the caller's clock in `parse_at`, with no leeway.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    const SECRET: &[u8] = b"test-signing-secret";

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_returns_issued_identity() {
        let token = issue_at(SECRET, "alice", 42, TimeDelta::seconds(3600), issued_at()).unwrap();

        let identity = parse_at(SECRET, &token, issued_at()).unwrap();
        assert_eq!(
            identity,
            Identity {
                user_id: 42,
                username: String::from("alice")
            }
        );
    }

    #[test]
    fn test_token_expires_after_duration() {
        let token = issue_at(SECRET, "alice", 42, TimeDelta::seconds(3600), issued_at()).unwrap();

        let later = issued_at() + TimeDelta::seconds(3601);
        assert!(matches!(
            parse_at(SECRET, &token, later),
            Err(Error::TokenExpired)
        ));
    }

    #[test]
    fn test_expiry_boundary_has_no_leeway() {
        let duration = TimeDelta::seconds(600);
        let token = issue_at(SECRET, "alice", 42, duration, issued_at()).unwrap();

        let just_before = issued_at() + duration - TimeDelta::seconds(1);
        let at_expiry = issued_at() + duration;
        let just_after = issued_at() + duration + TimeDelta::seconds(1);

        assert!(parse_at(SECRET, &token, just_before).is_ok());
        assert!(parse_at(SECRET, &token, at_expiry).is_ok());
        assert!(matches!(
            parse_at(SECRET, &token, just_after),
            Err(Error::TokenExpired)
        ));
    }

    #[test]
    fn test_wall_clock_round_trip() {
        let token = issue(SECRET, "bob", 7, TimeDelta::seconds(60)).unwrap();
        let identity = parse(SECRET, &token).unwrap();
        assert_eq!(identity.username, "bob");
        assert_eq!(identity.user_id, 7);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue(SECRET, "alice", 42, TimeDelta::seconds(3600)).unwrap();
        assert!(matches!(
            parse(b"some-other-secret", &token),
            Err(Error::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let token = issue(SECRET, "alice", 42, TimeDelta::seconds(3600)).unwrap();
        let signature_start = token.rfind('.').unwrap() + 1;

        let mut bytes = token.into_bytes();
        let target = signature_start + 5;
        bytes[target] = if bytes[target] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(
            parse(SECRET, &tampered),
            Err(Error::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let alice = issue(SECRET, "alice", 42, TimeDelta::seconds(3600)).unwrap();
        let mallory = issue(SECRET, "mallory", 1, TimeDelta::seconds(3600)).unwrap();

        let alice_parts: Vec<&str> = alice.split('.').collect();
        let mallory_parts: Vec<&str> = mallory.split('.').collect();
        let spliced = format!("{}.{}.{}", alice_parts[0], mallory_parts[1], alice_parts[2]);

        assert!(matches!(parse(SECRET, &spliced), Err(Error::InvalidToken)));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        for token in ["", "not-a-token", "a.b", "a.b.c"] {
            assert!(
                matches!(parse(SECRET, token), Err(Error::InvalidToken)),
                "{token:?} was accepted"
            );
        }
    }

    #[test]
    fn test_other_algorithms_are_rejected() {
        let claims = Claims::new("alice", 42, TimeDelta::seconds(3600), Utc::now()).unwrap();
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(parse(SECRET, &token), Err(Error::InvalidToken)));
    }

    #[test]
    fn test_unauthorized_claims_are_rejected() {
        let exp = (Utc::now() + TimeDelta::seconds(3600)).timestamp();
        let claims = json!({ "authorized": false, "user": "alice", "id": 42, "exp": exp });
        let token = encode(
            &Header::new(ALGORITHM),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(parse(SECRET, &token), Err(Error::InvalidToken)));
    }

    #[test]
    fn test_token_carries_expected_claims() {
        let token = issue_at(SECRET, "alice", 42, TimeDelta::seconds(3600), issued_at()).unwrap();

        let raw = decode::<serde_json::Value>(&token, &DecodingKey::from_secret(SECRET), &validation())
            .unwrap()
            .claims;

        assert_eq!(raw["authorized"], json!(true));
        assert_eq!(raw["user"], json!("alice"));
        assert_eq!(raw["id"], json!(42));
        assert_eq!(raw["iat"], json!(issued_at().timestamp()));
        assert_eq!(raw["exp"], json!(issued_at().timestamp() + 3600));
    }

    #[test]
    fn test_large_user_ids_survive_round_trip() {
        let token = issue(SECRET, "alice", u64::from(u32::MAX) + 1, TimeDelta::seconds(60)).unwrap();
        assert_eq!(parse(SECRET, &token).unwrap().user_id, u64::from(u32::MAX) + 1);
    }
}
