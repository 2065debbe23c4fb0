//! Authentication middleware for protecting routes.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};

use crate::{ctx::Ctx, prelude::*};

/// Middleware that requires a resolved identity to reach the route.
///
/// Must run after [`crate::ctx::resolver::mw_ctx_resolver`]. Requests without
/// a valid bearer token get a 401 and never reach the handler.
///
/// # Examples
///
/// ```rust
/// use axum::{Router, middleware, routing::get};
/// use chrono::TimeDelta;
/// use vitals_auth::config::AuthConfig;
/// use vitals_web::{ctx::resolver::mw_ctx_resolver, mw_auth::mw_require_auth};
///
/// let auth = AuthConfig::new("MySuperSecret", TimeDelta::hours(1));
/// let app: Router<()> = Router::new()
///     .route("/protected", get(|| async { "ok" }))
///     .route_layer(middleware::from_fn(mw_require_auth))
///     .layer(middleware::from_fn_with_state(auth, mw_ctx_resolver));
/// ```
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request<Body>, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}
