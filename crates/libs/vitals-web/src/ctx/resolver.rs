//! Context resolver for extracting the caller's identity from HTTP requests.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use vitals_auth::{AUTH_HEADER, AUTH_SCHEME, config::AuthConfig};

use crate::{ctx::Ctx, prelude::*};

/// Middleware resolving the request context from the `Authorization` header.
///
/// The outcome, `Result<Ctx, vitals_auth::error::Error>`, is stored in the
/// request extensions. Rejecting is left to [`crate::mw_auth::mw_require_auth`],
/// so this layer can sit in front of public routes too.
///
/// # Examples
///
/// ```rust
/// use axum::Router;
/// use chrono::TimeDelta;
/// use vitals_auth::config::AuthConfig;
/// use vitals_web::ctx::resolver::mw_ctx_resolver;
///
/// let auth = AuthConfig::new("MySuperSecret", TimeDelta::hours(1));
/// let app: Router<()> = Router::new()
///     .layer(axum::middleware::from_fn_with_state(auth, mw_ctx_resolver));
/// ```
pub async fn mw_ctx_resolver(
    State(auth): State<AuthConfig>,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = bearer_token(&headers)
        .and_then(|token| auth.parse(token))
        .map(Ctx::from);

    if let Err(err) = &ctx {
        debug!("No identity resolved for {} {}: {err}", req.method(), req.uri().path());
    }
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// The header value must split on single spaces into exactly the scheme and
/// a non-empty token.
pub fn bearer_token(headers: &HeaderMap) -> core::result::Result<&str, vitals_auth::error::Error> {
    let header = headers
        .get(AUTH_HEADER)
        .ok_or(vitals_auth::error::Error::TokenMissing)?
        .to_str()
        .map_err(|_| vitals_auth::error::Error::MalformedHeader)?;

    if header.is_empty() {
        return Err(vitals_auth::error::Error::TokenMissing);
    }

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(AUTH_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(vitals_auth::error::Error::MalformedHeader),
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<core::result::Result<Ctx, vitals_auth::error::Error>>()
            .ok_or(Error::CtxMissing)?
            .clone()
            .map_err(Error::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};

    use super::*;
    use vitals_auth::error::Error as AuthError;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_is_extracted() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_header_name_is_case_insensitive() {
        for name in ["authorization", "AUTHORIZATION", AUTH_HEADER] {
            let mut headers = HeaderMap::new();
            headers.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_static("Bearer abc"),
            );
            assert_eq!(bearer_token(&headers).unwrap(), "abc", "{name} was ignored");
        }
    }

    #[test]
    fn test_missing_header_is_reported_as_missing() {
        assert!(matches!(bearer_token(&HeaderMap::new()), Err(AuthError::TokenMissing)));
        assert!(matches!(bearer_token(&headers_with("")), Err(AuthError::TokenMissing)));
    }

    #[test]
    fn test_malformed_headers_are_rejected() {
        for value in [
            "abc.def.ghi",
            "Bearer",
            "Bearer ",
            "Bearer  abc",
            "Bearer abc extra",
            "bearer abc",
            "Basic abc",
        ] {
            assert!(
                matches!(bearer_token(&headers_with(value)), Err(AuthError::MalformedHeader)),
                "{value:?} was accepted"
            );
        }
    }
}
