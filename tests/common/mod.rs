#![allow(dead_code)]

use chrono::NaiveDate;
use employees_db::{BulkPlan, Employee, EmployeeGenerator, InMemoryStore, NameCatalog};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const SEED: u64 = 42;

/// Fixed "today" so generated ages do not drift between runs.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn employee(surname: &str, given_name: &str, patronymic: &str, dob: &str, gender: &str) -> Employee {
    Employee::new(surname, given_name, patronymic, date(dob), gender)
}

/// `n` records with pairwise distinct identity keys.
pub fn distinct_employees(n: usize) -> Vec<Employee> {
    (0..n)
        .map(|i| employee(&format!("Surname{i:05}"), "Petr", "Ivanovich", "1990-01-01", "Male"))
        .collect()
}

/// Seeded bulk data set: `total` general records then `special` matching ones.
pub fn bulk_records(catalog: &NameCatalog, total: u64, special: u64) -> Vec<Employee> {
    EmployeeGenerator::new(catalog, StdRng::seed_from_u64(SEED), reference_date())
        .into_bulk(BulkPlan::new(total, special))
        .collect()
}

pub fn fresh_store() -> InMemoryStore {
    InMemoryStore::with_schema()
}
