//! Main Crate Error

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Models(#[from] vitals_models::error::Error),

    /// Failure inside the auth crate that is not the caller's fault.
    #[error(transparent)]
    Auth(#[from] vitals_auth::error::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    /* Api Errors */
    #[error("Unauthorized: {0}")]
    Unauthorized(vitals_auth::error::Error),

    #[error("Context Missing")]
    CtxMissing,

    #[error("Missing Credentials")]
    MissingCredentials,

    #[error("Invalid username and/or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid {0} id")]
    InvalidId(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Models(_) | Error::Auth(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::Unauthorized(_) | Error::CtxMissing => StatusCode::UNAUTHORIZED,
            Error::MissingCredentials
            | Error::InvalidCredentials
            | Error::InvalidToken
            | Error::BadRequest(_)
            | Error::InvalidId(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// The message sent to the client.
    pub fn public_message(&self) -> String {
        match self.status() {
            StatusCode::INTERNAL_SERVER_ERROR => String::from(INTERNAL_ERROR_MESSAGE),
            StatusCode::UNAUTHORIZED => String::from("Unauthorized"),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Creating API error response for error: {:?}", self);
        } else {
            debug!("Rejecting request with {status}: {self}");
        }

        let body = Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}
