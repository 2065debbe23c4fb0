//! Database error types.

/// Database operation errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Database connection pool error.
    #[error(transparent)]
    R2D2(#[from] diesel::r2d2::PoolError),

    /// Diesel ORM operation error.
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),

    /// A pending migration failed to apply.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Required configuration is missing from the environment.
    #[error("Env Variable '{0}' missing")]
    MissingEnv(&'static str),
}
