//! Listener configuration.

/// Bind address used when `PORT` is not set.
pub const DEFAULT_BIND_ADDRESS: &str = "localhost:8080";

pub const BIND_ADDRESS_ENV: &str = "PORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `host:port` to listen on.
    pub bind_address: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(BIND_ADDRESS_ENV).ok())
    }

    fn from_value(value: Option<String>) -> Self {
        let bind_address = value
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| String::from(DEFAULT_BIND_ADDRESS));
        Self { bind_address }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address_defaults_to_localhost() {
        assert_eq!(ServerConfig::from_value(None).bind_address, "localhost:8080");
        assert_eq!(
            ServerConfig::from_value(Some(String::from("  "))).bind_address,
            "localhost:8080"
        );
    }

    #[test]
    fn test_bind_address_is_taken_verbatim() {
        let config = ServerConfig::from_value(Some(String::from("0.0.0.0:9000")));
        assert_eq!(config.bind_address, "0.0.0.0:9000");
    }
}
