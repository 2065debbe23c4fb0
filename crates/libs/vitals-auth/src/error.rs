//! Authentication errors.

#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    #[error("Invalid Token")]
    InvalidToken,
    #[error("Token Missing")]
    TokenMissing,
    #[error("Token Expired")]
    TokenExpired,
    #[error("Malformed Authorization Header")]
    MalformedHeader,
    #[error(transparent)]
    TokenCreation(#[from] jsonwebtoken::errors::Error),
    #[error("Token expiration out of range")]
    ExpirationOutOfRange,

    #[error("Error hashing password {0}")]
    PasswordHash(argon2::password_hash::Error),
    #[error("Error verifying bcrypt hash {0}")]
    Bcrypt(String),
    #[error("Unsupported password hash format")]
    UnsupportedHash,
}
