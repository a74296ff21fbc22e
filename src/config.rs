//! Environment-driven configuration
//!
//! Connection parameters use the standard libpq variable names. Workload
//! knobs use an `EMPLOYEES_` prefix. There is no config file.

use crate::benchmark::DEFAULT_PREVIEW_LIMIT;
use crate::error::{Error, Result};
use crate::generator::{DEFAULT_BULK_TOTAL, DEFAULT_SPECIAL_COUNT};
use crate::loader::DEFAULT_BATCH_SIZE;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5433;
pub const DEFAULT_DATABASE: &str = "employees_db";
pub const DEFAULT_USER: &str = "postgres";

#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            user: DEFAULT_USER.to_string(),
            password: String::new(),
        }
    }
}

impl ConnectionConfig {
    /// Load from `PGHOST`, `PGPORT`, `PGDATABASE`, `PGUSER`, `PGPASSWORD`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("PGHOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PGPORT") {
            config.port = parse_var("PGPORT", &port)?;
        }
        if let Some(database) = lookup("PGDATABASE") {
            config.database = database;
        }
        if let Some(user) = lookup("PGUSER") {
            config.user = user;
        }
        if let Some(password) = lookup("PGPASSWORD") {
            config.password = password;
        }

        Ok(config)
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user);
        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Sizes of the bulk load and the benchmark preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadConfig {
    pub batch_size: usize,
    pub bulk_total: u64,
    pub special_count: u64,
    pub preview_limit: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            bulk_total: DEFAULT_BULK_TOTAL,
            special_count: DEFAULT_SPECIAL_COUNT,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

impl WorkloadConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("EMPLOYEES_BATCH_SIZE") {
            config.batch_size = parse_var("EMPLOYEES_BATCH_SIZE", &value)?;
        }
        if let Some(value) = lookup("EMPLOYEES_BULK_TOTAL") {
            config.bulk_total = parse_var("EMPLOYEES_BULK_TOTAL", &value)?;
        }
        if let Some(value) = lookup("EMPLOYEES_SPECIAL_COUNT") {
            config.special_count = parse_var("EMPLOYEES_SPECIAL_COUNT", &value)?;
        }
        if let Some(value) = lookup("EMPLOYEES_PREVIEW_LIMIT") {
            config.preview_limit = parse_var("EMPLOYEES_PREVIEW_LIMIT", &value)?;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: '{}'", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_connection_defaults() {
        let config = ConnectionConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ConnectionConfig::default());
        assert_eq!(config.port, 5433);
        assert_eq!(config.database, "employees_db");
        assert_eq!(config.user, "postgres");
        assert!(config.password.is_empty());
    }

    #[test]
    fn test_connection_overrides() {
        let config = ConnectionConfig::from_lookup(lookup(&[
            ("PGHOST", "db.internal"),
            ("PGPORT", "5432"),
            ("PGPASSWORD", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 5432);
        assert_eq!(config.password, "secret");
    }

    #[test]
    fn test_invalid_port() {
        let err = ConnectionConfig::from_lookup(lookup(&[("PGPORT", "five")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_password_never_displayed() {
        let config = ConnectionConfig {
            password: "hunter2".to_string(),
            ..Default::default()
        };
        assert!(!config.to_string().contains("hunter2"));
        assert!(!format!("{:?}", config).contains("hunter2"));
        assert_eq!(config.to_string(), "postgres@localhost:5433/employees_db");
    }

    #[test]
    fn test_workload_overrides() {
        let config = WorkloadConfig::from_lookup(lookup(&[
            ("EMPLOYEES_BATCH_SIZE", "500"),
            ("EMPLOYEES_BULK_TOTAL", "2600"),
        ]))
        .unwrap();
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.bulk_total, 2600);
        assert_eq!(config.special_count, 100);
        assert_eq!(config.preview_limit, 20);
        assert!(WorkloadConfig::from_lookup(lookup(&[("EMPLOYEES_BATCH_SIZE", "-1")])).is_err());
    }
}
