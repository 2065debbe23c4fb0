//! HTTP-facing logic for the vitals server.
//!
//! Handlers in the server binary are thin wrappers around the functions in
//! this crate, which keeps the request handling testable without a socket.
//!
//! - [`ctx`]: request context and the bearer token resolver
//! - [`mw_auth`]: middleware rejecting requests without a valid identity
//! - [`session`]: login, token validation and token refresh
//! - [`user`] and [`vitals`]: operations behind the protected routes

pub mod ctx;
pub mod error;
pub mod extract;
pub mod mw_auth;
pub mod prelude;
pub mod session;
pub mod user;
pub mod vitals;
