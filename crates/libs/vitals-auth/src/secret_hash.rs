//! Password hashing and verification.
//!
//! New hashes are Argon2 PHC strings. Verification also accepts bcrypt hashes
//! (`$2a$`, `$2b$`, `$2y$`) so that accounts imported from older deployments
//! keep working. [`needs_rehash`] tells callers when a stored hash should be
//! replaced by an Argon2 one after a successful verification.
//!
//! # Examples
//!
//! ```rust
//! use vitals_auth::secret_hash::{generate_password_hash, verify_password};
//!
//! let hash = generate_password_hash("rightpass").unwrap();
//!
//! assert!(verify_password("rightpass", &hash));
//! assert!(!verify_password("wrongpass", &hash));
//! assert!(!verify_password("rightpass", "not a hash"));
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHashString, SaltString},
};
use rand::rngs::OsRng;
use tracing::warn;

use crate::prelude::*;

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Generates an Argon2 hash for `pw` with a random salt.
pub fn generate_password_hash(pw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(pw.as_bytes(), &salt)?.to_string())
}

/// Whether `hash` uses a legacy scheme and should be regenerated.
pub fn needs_rehash(hash: &str) -> bool {
    is_bcrypt(hash)
}

fn is_bcrypt(hash: &str) -> bool {
    BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix))
}

/// Verifies `pw` against a stored hash.
///
/// Returns `false` for a wrong password as well as for a hash that cannot be
/// parsed. The two cases are only told apart in the logs.
pub fn verify_password(pw: &str, hash: &str) -> bool {
    match try_verify_password(pw, hash) {
        Ok(valid) => valid,
        Err(err) => {
            warn!("Stored password hash could not be checked: {err}");
            false
        }
    }
}

/// Verifies `pw` against a stored hash.
///
/// * `Ok(true)` - Password matches the hash
/// * `Ok(false)` - Password does not match the hash
/// * `Err(Error)` - The hash is malformed or in an unsupported format
pub fn try_verify_password(pw: &str, hash: &str) -> Result<bool> {
    if is_bcrypt(hash) {
        return bcrypt::verify(pw, hash).map_err(|err| Error::Bcrypt(err.to_string()));
    }
    if !hash.starts_with('$') {
        return Err(Error::UnsupportedHash);
    }

    let hash = PasswordHashString::new(hash)?;
    Ok(Argon2::default()
        .verify_password(pw.as_bytes(), &hash.password_hash())
        .is_ok())
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}
