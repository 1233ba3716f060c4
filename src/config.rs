//! Process configuration from environment variables.

use crate::error::ConfigError;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/plants";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_SCHEMA: &str = "plants";

/// Where aggregate roots are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL, one JSONB document per root.
    Postgres,
    /// Process memory; lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err("expected postgres or memory".into()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// PostgreSQL schema holding the `users` and `catalog_plants` tables.
    pub schema: String,
    pub bcrypt_cost: u32,
    pub body_limit: usize,
    pub storage: StorageBackend,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let schema: String = load(&lookup, "PLANTS_SCHEMA", DEFAULT_SCHEMA.to_string())?;
        if !is_identifier(&schema) {
            return Err(ConfigError::Invalid {
                key: "PLANTS_SCHEMA",
                value: schema,
                reason: "must be a plain SQL identifier".into(),
            });
        }
        let bcrypt_cost: u32 = load(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
                reason: "must be between 4 and 31".into(),
            });
        }
        Ok(Config {
            database_url: load(&lookup, "DATABASE_URL", DEFAULT_DATABASE_URL.to_string())?,
            bind_addr: load(&lookup, "BIND_ADDR", default_bind_addr())?,
            max_connections: load(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            schema,
            bcrypt_cost,
            body_limit: load(&lookup, "BODY_LIMIT_BYTES", 2 * 1024 * 1024)?,
            storage: load(&lookup, "STORAGE", StorageBackend::Postgres)?,
        })
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

fn load<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default");
            Ok(default)
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = from(&[]).unwrap();
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.schema, DEFAULT_SCHEMA);
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(cfg.storage, StorageBackend::Postgres);
    }

    #[test]
    fn values_are_parsed() {
        let cfg = from(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("STORAGE", "Memory"),
            ("BCRYPT_COST", "4"),
            ("PLANTS_SCHEMA", "garden_2"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.storage, StorageBackend::Memory);
        assert_eq!(cfg.bcrypt_cost, 4);
        assert_eq!(cfg.schema, "garden_2");
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            from(&[("DB_MAX_CONNECTIONS", "many")]),
            Err(ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", .. })
        ));
        assert!(matches!(
            from(&[("BCRYPT_COST", "2")]),
            Err(ConfigError::Invalid { key: "BCRYPT_COST", .. })
        ));
        assert!(matches!(
            from(&[("PLANTS_SCHEMA", "plants; DROP TABLE users")]),
            Err(ConfigError::Invalid { key: "PLANTS_SCHEMA", .. })
        ));
        assert!(matches!(
            from(&[("STORAGE", "mongo")]),
            Err(ConfigError::Invalid { key: "STORAGE", .. })
        ));
    }
}
