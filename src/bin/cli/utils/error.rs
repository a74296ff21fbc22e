//! CLI error handling utilities
//!
//! Maps library errors onto user-facing messages and stable exit codes.

use std::fmt;

/// CLI exit codes for different error categories
pub mod exit_codes {
    /// Invalid command line usage
    pub const USAGE_ERROR: i32 = 2;
    /// Malformed name, date or record
    pub const VALIDATION_ERROR: i32 = 5;
    /// Bad environment configuration
    pub const CONFIG_ERROR: i32 = 6;
    /// Store unreachable or statement failed
    pub const DATABASE_ERROR: i32 = 8;
    /// Internal error
    pub const INTERNAL_ERROR: i32 = 99;
}

/// CLI-specific error type with user-friendly messages
#[derive(Debug)]
pub enum CliError {
    /// Invalid command line usage
    Usage(String),
    /// Validation error
    Validation(String),
    /// Configuration error
    Config(String),
    /// Database operation error
    Database(String),
    /// Internal error
    Internal(String),
}

impl CliError {
    /// Get the appropriate exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => exit_codes::USAGE_ERROR,
            CliError::Validation(_) => exit_codes::VALIDATION_ERROR,
            CliError::Config(_) => exit_codes::CONFIG_ERROR,
            CliError::Database(_) => exit_codes::DATABASE_ERROR,
            CliError::Internal(_) => exit_codes::INTERNAL_ERROR,
        }
    }

    /// Get a short error category name for logging
    pub fn category(&self) -> &'static str {
        match self {
            CliError::Usage(_) => "USAGE",
            CliError::Validation(_) => "VALIDATION",
            CliError::Config(_) => "CONFIG",
            CliError::Database(_) => "DATABASE",
            CliError::Internal(_) => "INTERNAL",
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{}. Use --help for available commands.", msg),
            CliError::Validation(msg) => write!(f, "Validation error: {}", msg),
            CliError::Config(msg) => write!(f, "{}", msg),
            CliError::Database(msg) => write!(
                f,
                "{}. Check PGHOST/PGPORT/PGDATABASE/PGUSER/PGPASSWORD.",
                msg
            ),
            CliError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<employees_db::Error> for CliError {
    fn from(err: employees_db::Error) -> Self {
        let msg = err.to_string();
        if err.is_input_error() {
            CliError::Validation(msg)
        } else if err.is_connectivity_error() {
            CliError::Database(msg)
        } else if matches!(err, employees_db::Error::Config(_)) {
            CliError::Config(msg)
        } else {
            CliError::Internal(msg)
        }
    }
}

impl From<&str> for CliError {
    fn from(msg: &str) -> Self {
        CliError::Validation(msg.to_string())
    }
}

impl From<String> for CliError {
    fn from(msg: String) -> Self {
        CliError::Validation(msg)
    }
}
