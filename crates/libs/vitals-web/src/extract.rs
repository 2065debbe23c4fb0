//! Request body extraction.

use axum::extract::{FromRequest, rejection::JsonRejection};

use crate::prelude::*;

/// JSON request body whose rejections use the API error shape.
///
/// Behaves like [`axum::Json`], except that a missing content type or a body
/// that does not deserialize produces a 400 with `{"error": "..."}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct Payload<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

/// Parses a numeric path id, failing with `Invalid <kind> id`.
pub fn parse_id(raw: &str, kind: &'static str) -> Result<i64> {
    raw.parse::<u64>()
        .ok()
        .and_then(|id| i64::try_from(id).ok())
        .ok_or(Error::InvalidId(kind))
}
