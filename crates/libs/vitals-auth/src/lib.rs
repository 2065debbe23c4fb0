//! Authentication primitives for the vitals server.
//!
//! - [`jwt`]: issue and parse signed, time-bounded identity tokens.
//! - [`secret_hash`]: hash and verify user passwords.
//! - [`config`]: the process-wide signing key and token duration.

pub mod config;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod secret_hash;

pub const AUTH_HEADER: &str = "Authorization";
pub const AUTH_SCHEME: &str = "Bearer";
