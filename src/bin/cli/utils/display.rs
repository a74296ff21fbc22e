//! Display and output utilities for CLI commands
//!
//! Provides formatting and output helpers for consistent CLI presentation.
//! Supports both text and JSON output formats.

use chrono::NaiveDate;
use employees_db::model::DATE_FORMAT;
use employees_db::Employee;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Format duration in human-readable form
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        format!("{} μs", duration.as_micros())
    } else if secs < 1.0 {
        format!("{:.3} ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.2} s", secs)
    } else {
        format!("{:.1} min", secs / 60.0)
    }
}

/// Print success message with checkmark
pub fn print_success(message: &str) {
    println!("[OK] {}", message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("[INFO] {}", message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("[WARN] {}", message);
}

/// Print a progress line, overwriting the previous one
pub fn print_progress(message: &str) {
    print!("\r{}", message);
    io::stdout().flush().ok();
}

/// Complete a progress indicator
pub fn complete_progress() {
    println!();
}

/// One listing row: name, birth date, gender, age on `today`
pub fn format_employee_row(employee: &Employee, today: NaiveDate) -> String {
    format!("{}\t{}", employee, employee.age_on(today))
}

/// Employee as a JSON object including the derived age
pub fn employee_json(employee: &Employee, today: NaiveDate) -> serde_json::Value {
    serde_json::json!({
        "surname": employee.surname,
        "given_name": employee.given_name,
        "patronymic": employee.patronymic,
        "date_of_birth": employee.date_of_birth.format(DATE_FORMAT).to_string(),
        "gender": employee.gender,
        "age": employee.age_on(today),
    })
}

// ============================================================================

/// JSON output builder for structured CLI output
#[derive(Debug, Clone, Default)]
pub struct JsonOutput {
    fields: BTreeMap<String, serde_json::Value>,
}

impl JsonOutput {
    /// Create a new JSON output builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string field
    pub fn add_str(&mut self, key: &str, value: &str) -> &mut Self {
        self.fields.insert(key.to_string(), serde_json::Value::String(value.to_string()));
        self
    }

    /// Add an unsigned integer field
    pub fn add_uint(&mut self, key: &str, value: u64) -> &mut Self {
        self.fields.insert(key.to_string(), serde_json::Value::from(value));
        self
    }

    /// Add a float field
    pub fn add_float(&mut self, key: &str, value: f64) -> &mut Self {
        if let Some(num) = serde_json::Number::from_f64(value) {
            self.fields.insert(key.to_string(), serde_json::Value::Number(num));
        }
        self
    }

    /// Add a boolean field
    pub fn add_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.fields.insert(key.to_string(), serde_json::Value::Bool(value));
        self
    }

    /// Add an arbitrary JSON value
    pub fn add_value(&mut self, key: &str, value: serde_json::Value) -> &mut Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Set the status field (common for all responses)
    pub fn status(&mut self, success: bool) -> &mut Self {
        self.add_str("status", if success { "success" } else { "error" })
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        let obj: serde_json::Map<String, serde_json::Value> =
            self.fields.clone().into_iter().collect();
        serde_json::to_string_pretty(&serde_json::Value::Object(obj))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Print JSON output to stdout
    pub fn print(&self) {
        println!("{}", self.to_json());
    }
}
