//! Database models and ORM layer for the vitals server.
//!
//! Provides Diesel-based models, queries, connection management and embedded
//! migrations for users and their vitals records.
//!
//! # Usage
//!
//! ```rust,no_run
//! use vitals_models::{db::{config::DbConfig, connection::DbConnection}, users::user::User};
//!
//! let config = DbConfig::from_env().unwrap();
//! let conn = DbConnection::new(&config).unwrap().setup().unwrap();
//!
//! let users = User::fetch_all(&conn).unwrap();
//! println!("Found {} users", users.len());
//! ```

pub mod db;
pub mod error;
pub mod prelude;
mod schema;
pub mod users;
pub mod vitals;
