//! Server configuration module.
//!
//! Where to listen and which database file to open. Loaded from `MERKA_*`
//! environment variables (after `.env`) with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Default database file, next to the working directory.
pub const DEFAULT_DB_PATH: &str = "barberia.db";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (`MERKA_HOST`)
    pub host: IpAddr,

    /// HTTP port (`MERKA_PORT`)
    pub port: u16,

    /// SQLite file (`MERKA_DB_PATH`)
    pub database_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(ServerConfig {
            host: lookup("MERKA_HOST")
                .unwrap_or_else(|| "0.0.0.0".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MERKA_HOST".to_string()))?,

            port: lookup("MERKA_PORT")
                .unwrap_or_else(|| "8501".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MERKA_PORT".to_string()))?,

            database_path: lookup("MERKA_DB_PATH")
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
                .into(),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8501);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8501");
        assert_eq!(config.database_path, PathBuf::from("barberia.db"));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("MERKA_HOST", "127.0.0.1"),
            ("MERKA_PORT", "9000"),
            ("MERKA_DB_PATH", "/var/lib/merka/shop.db"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.database_path, PathBuf::from("/var/lib/merka/shop.db"));
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("MERKA_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "MERKA_PORT"));
        assert_eq!(err.to_string(), "Invalid value for MERKA_PORT");
    }

    #[test]
    fn test_invalid_host() {
        assert!(ServerConfig::from_lookup(lookup(&[("MERKA_HOST", "not a host")])).is_err());
    }
}
