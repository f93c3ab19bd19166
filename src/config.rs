// src/config.rs
use std::net::IpAddr;

use thiserror::Error;

const DEFAULT_HOST: [u8; 4] = [127, 0, 0, 1];
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PORT_SEARCH: u16 = 20;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set when STORE_BACKEND is postgres")]
    MissingDatabaseUrl,
    #[error("unknown STORE_BACKEND '{0}', expected 'postgres' or 'memory'")]
    UnknownBackend(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String, max_connections: u32 },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Extra ports tried after `port` when it is already taken.
    pub port_search: u16,
    pub store: StoreBackend,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST")
            .and_then(|h| h.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::from(DEFAULT_HOST));
        let port = lookup("PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let port_search = lookup("PORT_SEARCH")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT_SEARCH);

        let backend = lookup("STORE_BACKEND").unwrap_or_else(|| "postgres".to_string());
        let store = match backend.trim().to_ascii_lowercase().as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?,
                max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                    .and_then(|n| n.parse::<u32>().ok())
                    .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            },
            "memory" => StoreBackend::Memory,
            _ => return Err(ConfigError::UnknownBackend(backend)),
        };

        Ok(Self { host, port, port_search, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_with_memory_backend() {
        let config = config_from(&[("STORE_BACKEND", "memory")]).unwrap();
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.port_search, 20);
        assert_eq!(config.store, StoreBackend::Memory);
    }

    #[test]
    fn postgres_is_the_default_and_needs_a_url() {
        assert_eq!(config_from(&[]), Err(ConfigError::MissingDatabaseUrl));

        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/market"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/market".to_string(),
                max_connections: 12,
            }
        );
    }

    #[test]
    fn unparsable_host_and_port_fall_back() {
        let config = config_from(&[
            ("STORE_BACKEND", "memory"),
            ("HOST", "not-an-ip"),
            ("PORT", "99999"),
        ])
        .unwrap();
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.port, 3000);

        let config = config_from(&[("STORE_BACKEND", "memory"), ("HOST", "0.0.0.0"), ("PORT", "8080")])
            .unwrap();
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn rejects_unknown_backend() {
        assert_eq!(
            config_from(&[("STORE_BACKEND", "mongo")]),
            Err(ConfigError::UnknownBackend("mongo".to_string()))
        );
    }
}
