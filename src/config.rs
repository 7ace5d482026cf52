// src/config.rs
use log::LevelFilter;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Scylla,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
    pub scylla_node: String,
    pub log_level: LevelFilter,
}

impl Settings {
    /// Reads settings from the environment, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let invalid = |key: &'static str, value: String| ConfigError::InvalidValue { key, value };

        let bind_addr = match lookup("LEDGER_BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|_| invalid("LEDGER_BIND_ADDR", raw))?,
            None => SocketAddr::from(([127, 0, 0, 1], 5000)),
        };

        let storage = match lookup("LEDGER_STORAGE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("memory") => StorageBackend::Memory,
            Some("scylla") => StorageBackend::Scylla,
            Some(other) => return Err(invalid("LEDGER_STORAGE", other.to_string())),
        };

        let scylla_node = lookup("LEDGER_SCYLLA_NODE").unwrap_or_else(|| "127.0.0.1:9042".to_string());

        let log_level = match lookup("LEDGER_LOG_LEVEL") {
            Some(raw) => raw.parse().map_err(|_| invalid("LEDGER_LOG_LEVEL", raw))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            bind_addr,
            storage,
            scylla_node,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:5000");
        assert_eq!(settings.storage, StorageBackend::Memory);
        assert_eq!(settings.scylla_node, "127.0.0.1:9042");
        assert_eq!(settings.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("LEDGER_BIND_ADDR", "0.0.0.0:8080"),
            ("LEDGER_STORAGE", "Scylla"),
            ("LEDGER_SCYLLA_NODE", "db:9042"),
            ("LEDGER_LOG_LEVEL", "debug"),
        ])
        .unwrap();
        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(settings.storage, StorageBackend::Scylla);
        assert_eq!(settings.scylla_node, "db:9042");
        assert_eq!(settings.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            settings(&[("LEDGER_STORAGE", "mongo")]),
            Err(ConfigError::InvalidValue {
                key: "LEDGER_STORAGE",
                value: "mongo".into()
            })
        );
        assert!(settings(&[("LEDGER_BIND_ADDR", "localhost")]).is_err());
        assert!(settings(&[("LEDGER_LOG_LEVEL", "loud")]).is_err());
    }
}
