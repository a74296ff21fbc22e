//! Secondary indexes for the benchmark query
//!
//! Every index is created in its own statement, so one failure never blocks
//! the next. Nothing is rolled back; callers get one outcome per index.

use crate::store::EmployeeStore;
use std::fmt;
use tracing::{info, warn};

pub const GENDER_SURNAME_INDEX: &str = "idx_employees_gender_surname";
pub const GENDER_LOWER_SURNAME_INDEX: &str = "idx_employees_gender_lower_surname";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: String,
    /// Column list, including expressions and operator classes.
    pub columns: String,
}

impl IndexSpec {
    pub fn new(name: impl Into<String>, columns: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: columns.into(),
        }
    }

    pub fn create_sql(&self, table: &str) -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            self.name, table, self.columns
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStatus {
    Created,
    AlreadyExists,
    Failed(String),
}

impl IndexStatus {
    pub fn is_ok(&self) -> bool {
        !matches!(self, IndexStatus::Failed(_))
    }
}

impl fmt::Display for IndexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexStatus::Created => f.write_str("created"),
            IndexStatus::AlreadyExists => f.write_str("already exists"),
            IndexStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOutcome {
    pub name: String,
    pub status: IndexStatus,
}

#[derive(Debug, Clone)]
pub struct IndexAdvisor {
    specs: Vec<IndexSpec>,
}

impl IndexAdvisor {
    pub fn new(specs: Vec<IndexSpec>) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &[IndexSpec] {
        &self.specs
    }

    /// Try to create every index; a failure is recorded and the rest still run.
    pub async fn apply<S>(&self, store: &mut S) -> Vec<IndexOutcome>
    where
        S: EmployeeStore + ?Sized,
    {
        let mut outcomes = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let status = match store.create_index(spec).await {
                Ok(status) => {
                    info!(index = %spec.name, %status, "Index ensured");
                    status
                }
                Err(e) => {
                    warn!(index = %spec.name, error = %e, "Index creation failed");
                    IndexStatus::Failed(e.to_string())
                }
            };
            outcomes.push(IndexOutcome {
                name: spec.name.clone(),
                status,
            });
        }
        outcomes
    }

    pub fn all_succeeded(outcomes: &[IndexOutcome]) -> bool {
        outcomes.iter().all(|o| o.status.is_ok())
    }
}

impl Default for IndexAdvisor {
    /// Indexes serving `gender = ?` with a prefix match on surname, plus a
    /// case-insensitive variant on `lower(surname)`.
    fn default() -> Self {
        Self::new(vec![
            IndexSpec::new(GENDER_SURNAME_INDEX, "gender, surname text_pattern_ops"),
            IndexSpec::new(GENDER_LOWER_SURNAME_INDEX, "gender, lower(surname)"),
        ])
    }
}
