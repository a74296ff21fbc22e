//! Input validation utilities for CLI commands
//!
//! Provides consistent validation across all CLI commands with clear error messages.

use super::error::CliError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Validation limits for CLI operations
pub mod limits {
    /// Maximum rows generated by one `generate` run
    pub const MAX_BULK_TOTAL: u64 = 100_000_000;
    /// Maximum size of the special subset
    pub const MAX_SPECIAL_COUNT: u64 = 1_000_000;
    /// Maximum rows printed by `bench`
    pub const MAX_PREVIEW: usize = 10_000;
}

/// Parse a numeric option, naming it in the error
pub fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> CliResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Validation(format!("{} must be a non-negative number", name)))
}

/// Validate bulk generation parameters
pub fn validate_generate_params(total: u64, special: u64) -> CliResult<()> {
    if total > limits::MAX_BULK_TOTAL {
        return Err(format!("total cannot exceed {}", limits::MAX_BULK_TOTAL).into());
    }
    if special > limits::MAX_SPECIAL_COUNT {
        return Err(format!("special cannot exceed {}", limits::MAX_SPECIAL_COUNT).into());
    }
    if total == 0 && special == 0 {
        return Err("nothing to generate: total and special are both 0".into());
    }
    Ok(())
}

/// Validate the benchmark preview size
pub fn validate_preview(preview: usize) -> CliResult<()> {
    if preview > limits::MAX_PREVIEW {
        return Err(format!("preview cannot exceed {}", limits::MAX_PREVIEW).into());
    }
    Ok(())
}

/// Validate the gender argument of `insert`
pub fn validate_gender(gender: &str) -> CliResult<()> {
    if gender.trim().is_empty() {
        return Err("gender cannot be empty".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<u64>("total", " 42 ").unwrap(), 42);
        assert!(parse_number::<u64>("total", "-1").is_err());
        assert!(parse_number::<usize>("preview", "abc").is_err());
    }

    #[test]
    fn test_validate_generate_params() {
        assert!(validate_generate_params(1_000_000, 100).is_ok());
        assert!(validate_generate_params(0, 100).is_ok());
        assert!(validate_generate_params(0, 0).is_err());
        assert!(validate_generate_params(limits::MAX_BULK_TOTAL + 1, 0).is_err());
    }

    #[test]
    fn test_validate_gender() {
        assert!(validate_gender("Male").is_ok());
        assert!(validate_gender("  ").is_err());
    }
}
