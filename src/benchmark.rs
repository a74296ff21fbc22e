//! Selective query benchmark
//!
//! Runs `gender = ? AND surname LIKE 'prefix%' ORDER BY surname` against a
//! store and times only the query itself with a monotonic clock.

use crate::error::Result;
use crate::model::{Employee, Gender};
use crate::store::EmployeeStore;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::info;

pub const DEFAULT_PREVIEW_LIMIT: usize = 20;
pub const DEFAULT_SURNAME_PREFIX: &str = "F";

/// Exact match on gender combined with a case-sensitive surname prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPredicate {
    pub gender: Gender,
    pub surname_prefix: String,
}

impl QueryPredicate {
    pub fn new(gender: Gender, surname_prefix: impl Into<String>) -> Self {
        Self {
            gender,
            surname_prefix: surname_prefix.into(),
        }
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        employee.gender == self.gender.as_str() && employee.surname.starts_with(&self.surname_prefix)
    }

    /// `LIKE` pattern for the prefix with `%`, `_` and `\` escaped.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.surname_prefix.len() + 2);
        for c in self.surname_prefix.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

impl Default for QueryPredicate {
    fn default() -> Self {
        Self::new(Gender::Male, DEFAULT_SURNAME_PREFIX)
    }
}

/// Count of all matching rows plus the first few in query order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    pub total_matches: u64,
    pub preview: Vec<Employee>,
}

impl MatchSet {
    pub fn with_preview_capacity(preview_limit: usize) -> Self {
        Self {
            total_matches: 0,
            preview: Vec::with_capacity(preview_limit.min(1024)),
        }
    }

    pub fn push(&mut self, employee: Employee, preview_limit: usize) {
        self.total_matches += 1;
        if self.preview.len() < preview_limit {
            self.preview.push(employee);
        }
    }
}

#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub predicate: QueryPredicate,
    pub total_matches: u64,
    pub preview: Vec<Employee>,
    pub elapsed: Duration,
}

impl BenchmarkReport {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Whether every previewed row satisfies the predicate.
    pub fn preview_matches(&self) -> bool {
        self.preview.iter().all(|e| self.predicate.matches(e))
    }
}

/// Before/after timings of the same query around an index change.
#[derive(Debug, Clone)]
pub struct BenchmarkComparison {
    pub before: BenchmarkReport,
    pub after: BenchmarkReport,
}

impl BenchmarkComparison {
    /// Ratio of the old latency to the new one; above 1.0 means faster.
    pub fn speedup(&self) -> f64 {
        let after = self.after.elapsed_secs();
        if after > 0.0 {
            self.before.elapsed_secs() / after
        } else {
            f64::INFINITY
        }
    }

    pub fn same_result(&self) -> bool {
        self.before.total_matches == self.after.total_matches
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QueryEngine {
    preview_limit: usize,
}

impl QueryEngine {
    pub fn new(preview_limit: usize) -> Self {
        Self { preview_limit }
    }

    pub fn preview_limit(&self) -> usize {
        self.preview_limit
    }

    pub async fn run<S>(&self, store: &mut S, predicate: &QueryPredicate) -> Result<BenchmarkReport>
    where
        S: EmployeeStore + ?Sized,
    {
        let start = Instant::now();
        let matches = store.select_matching(predicate, self.preview_limit).await?;
        let elapsed = start.elapsed();

        info!(
            gender = %predicate.gender,
            prefix = %predicate.surname_prefix,
            matches = matches.total_matches,
            elapsed_us = elapsed.as_micros() as u64,
            "Benchmark query completed"
        );

        Ok(BenchmarkReport {
            predicate: predicate.clone(),
            total_matches: matches.total_matches,
            preview: matches.preview,
            elapsed,
        })
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn employee(surname: &str, gender: &str) -> Employee {
        Employee::new(surname, "Ivan", "", NaiveDate::from_ymd_opt(1985, 3, 3).unwrap(), gender)
    }

    #[test]
    fn test_predicate_matches() {
        let p = QueryPredicate::default();
        assert!(p.matches(&employee("Fsurname12", "Male")));
        assert!(p.matches(&employee("F_special_3", "Male")));
        assert!(!p.matches(&employee("Fsurname12", "Female")));
        assert!(!p.matches(&employee("fedorov", "Male")));
        assert!(!p.matches(&employee("Asurname1", "Male")));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(QueryPredicate::default().like_pattern(), "F%");
        assert_eq!(QueryPredicate::new(Gender::Male, "F_1%").like_pattern(), "F\\_1\\%%");
        assert_eq!(QueryPredicate::new(Gender::Male, "a\\b").like_pattern(), "a\\\\b%");
    }

    #[test]
    fn test_match_set_bounds_preview() {
        let mut set = MatchSet::with_preview_capacity(2);
        for i in 0..5 {
            set.push(employee(&format!("F{i}"), "Male"), 2);
        }
        assert_eq!(set.total_matches, 5);
        assert_eq!(set.preview.len(), 2);
        assert_eq!(set.preview[0].surname, "F0");
    }

    #[test]
    fn test_speedup() {
        let report = |ms| BenchmarkReport {
            predicate: QueryPredicate::default(),
            total_matches: 10,
            preview: Vec::new(),
            elapsed: Duration::from_millis(ms),
        };
        let cmp = BenchmarkComparison {
            before: report(40),
            after: report(10),
        };
        assert!((cmp.speedup() - 4.0).abs() < 1e-9);
        assert!(cmp.same_result());
    }
}
