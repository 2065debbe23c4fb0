#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Auth(#[from] vitals_auth::error::Error),

    #[error(transparent)]
    Model(#[from] vitals_models::error::Error),

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("User '{0}' already exists")]
    UserExists(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),
}
