use tracing::Level;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Level,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    /// Read `EMPLOYEES_LOG_LEVEL` and `EMPLOYEES_LOG_FORMAT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup("EMPLOYEES_LOG_LEVEL") {
            config.level = match level.to_lowercase().as_str() {
                "trace" => Level::TRACE,
                "debug" => Level::DEBUG,
                "info" => Level::INFO,
                "error" => Level::ERROR,
                _ => Level::WARN,
            };
        }

        if let Some(format) = lookup("EMPLOYEES_LOG_FORMAT") {
            config.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Text,
            };
        }

        config
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
///
/// Logs go to stderr; stdout is reserved for command output. Calling this
/// twice keeps the first subscriber.
pub fn init_logging(level: Level, json_output: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("employees_db={},warn", level)));

    let installed = if json_output {
        let fmt_layer = fmt::layer()
            .json()
            .with_timer(SystemTime)
            .with_target(true)
            .with_writer(std::io::stderr);

        Registry::default().with(env_filter).with(fmt_layer).try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(SystemTime)
            .with_target(false)
            .with_writer(std::io::stderr);

        Registry::default().with(env_filter).with(fmt_layer).try_init()
    };

    if installed.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}

pub fn init_from_config(config: &LoggingConfig) {
    init_logging(config.level, config.format == LogFormat::Json);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_from_lookup() {
        let config = LoggingConfig::from_lookup(|key| match key {
            "EMPLOYEES_LOG_LEVEL" => Some("DEBUG".to_string()),
            "EMPLOYEES_LOG_FORMAT" => Some("json".to_string()),
            _ => None,
        });
        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.format, LogFormat::Json);

        let fallback = LoggingConfig::from_lookup(|_| Some("verbose".to_string()));
        assert_eq!(fallback, LoggingConfig::default());
    }
}
