//! Error types for the vitals server process.

/// Errors that stop the server from starting or keep it from running.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Model(#[from] vitals_models::error::Error),

    #[error("Server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
