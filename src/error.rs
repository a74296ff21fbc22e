use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid full name '{0}': expected at least surname and given name")]
    InvalidFullName(String),

    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Invalid record at position {index}: {reason}")]
    InvalidRecord { index: u64, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    pub fn error_code(&self) -> i32 {
        match self {
            Error::InvalidFullName(_) => -1,
            Error::InvalidDate { .. } => -2,
            Error::InvalidRecord { .. } => -3,
            Error::Config(_) => -13,
            Error::Database(_) => -20,
            Error::Storage(_) => -14,
        }
    }

    /// Input errors are raised before anything reaches the store.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidFullName(_) | Error::InvalidDate { .. } | Error::InvalidRecord { .. }
        )
    }

    /// Store unreachable or a statement failed.
    pub fn is_connectivity_error(&self) -> bool {
        matches!(self, Error::Database(_) | Error::Storage(_))
    }
}
