//! User accounts.

pub mod user;
