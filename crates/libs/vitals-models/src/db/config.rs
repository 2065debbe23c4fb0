//! Database configuration management.

use std::fmt::Display;

use crate::prelude::*;

/// Database connection configuration.
pub struct DbConfig {
    /// PostgreSQL database URL.
    pub database_url: String,
}

fn get_env_variable(var: &'static str) -> Result<String> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(Error::MissingEnv(var))
}

impl DbConfig {
    /// Create database configuration from environment variables.
    ///
    /// Uses `DATABASE_URL` when set, otherwise builds the URL from `DB_HOST`,
    /// `DB_USER`, `DB_PASSWORD` and `DB_NAME`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use vitals_models::db::config::DbConfig;
    ///
    /// let config = DbConfig::from_env().unwrap();
    /// ```
    pub fn from_env() -> Result<Self> {
        if let Ok(database_url) = get_env_variable("DATABASE_URL") {
            return Ok(Self { database_url });
        }

        Ok(Self::from_parts(
            &get_env_variable("DB_HOST")?,
            &get_env_variable("DB_USER")?,
            &std::env::var("DB_PASSWORD").unwrap_or_default(),
            &get_env_variable("DB_NAME")?,
        ))
    }

    /// Builds a PostgreSQL keyword/value connection string.
    pub fn from_parts(host: &str, user: &str, password: &str, dbname: &str) -> Self {
        let mut database_url = format!(
            "host={} user={} dbname={}",
            quote(host),
            quote(user),
            quote(dbname)
        );
        if !password.is_empty() {
            database_url.push_str(&format!(" password={}", quote(password)));
        }
        Self { database_url }
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

impl Display for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}
