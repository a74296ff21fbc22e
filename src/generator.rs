//! Synthetic employee generation
//!
//! Names come from an immutable [`NameCatalog`] that is built once and
//! borrowed by every generator. Bulk generation cycles surname letters and
//! alternates gender by index so the letter and gender distribution does not
//! depend on the RNG, then appends a fixed-size subset that matches the
//! benchmark predicate.

use crate::benchmark::QueryPredicate;
use crate::model::{Employee, Gender};
use chrono::{Datelike, Local, NaiveDate};
use rand::seq::IndexedRandom;
use rand::Rng;

pub const LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

pub const DEFAULT_SURNAMES_PER_LETTER: usize = 200;
pub const DEFAULT_BULK_TOTAL: u64 = 1_000_000;
pub const DEFAULT_SPECIAL_COUNT: u64 = 100;

pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 70;
pub const MAX_SPECIAL_AGE: i32 = 60;
/// Days are capped so every month is valid.
pub const MAX_DAY: u32 = 28;

const GIVEN_NAMES: [&str; 16] = [
    "Ivan", "Petr", "Alex", "John", "Michael", "David", "Robert", "William", "James", "Thomas",
    "Andrey", "Nikolay", "Sergey", "Vladimir", "Roman", "Igor",
];

const PATRONYMICS: [&str; 10] = [
    "Ivanovich",
    "Petrovich",
    "Sergeevich",
    "Alexandrovich",
    "Mikhailovich",
    "Dmitrievich",
    "Vladimirovich",
    "Nikolaevich",
    "Romanovich",
    "Igorevich",
];

/// Read-only name pools shared by all generators.
#[derive(Debug, Clone)]
pub struct NameCatalog {
    surnames: Vec<Vec<String>>,
    given_names: Vec<String>,
    patronymics: Vec<String>,
}

impl NameCatalog {
    /// Build a catalog with `surnames_per_letter` surnames for each of A-Z.
    ///
    /// A value of zero is raised to one so every letter can be drawn.
    pub fn new(surnames_per_letter: usize) -> Self {
        let per_letter = surnames_per_letter.max(1);
        let surnames = LETTERS
            .iter()
            .map(|letter| (1..=per_letter).map(|n| format!("{letter}surname{n}")).collect())
            .collect();

        Self {
            surnames,
            given_names: GIVEN_NAMES.iter().map(|s| s.to_string()).collect(),
            patronymics: PATRONYMICS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn surnames_for(&self, letter: char) -> &[String] {
        match letter_index(letter) {
            Some(idx) => &self.surnames[idx],
            None => &[],
        }
    }

    pub fn given_names(&self) -> &[String] {
        &self.given_names
    }

    pub fn patronymics(&self) -> &[String] {
        &self.patronymics
    }

    pub fn surnames_per_letter(&self) -> usize {
        self.surnames.first().map_or(0, Vec::len)
    }
}

impl Default for NameCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_SURNAMES_PER_LETTER)
    }
}

fn letter_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    upper.is_ascii_uppercase().then(|| (upper as u8 - b'A') as usize)
}

/// Shape of a bulk load: `total` general records plus `special_count`
/// records matching `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkPlan {
    pub total: u64,
    pub special_count: u64,
    pub target: QueryPredicate,
}

impl BulkPlan {
    pub fn new(total: u64, special_count: u64) -> Self {
        Self {
            total,
            special_count,
            target: QueryPredicate::default(),
        }
    }

    pub fn records_len(&self) -> u64 {
        self.total + self.special_count
    }
}

impl Default for BulkPlan {
    fn default() -> Self {
        Self::new(DEFAULT_BULK_TOTAL, DEFAULT_SPECIAL_COUNT)
    }
}

/// Produces random employees from a borrowed catalog.
pub struct EmployeeGenerator<'c, R> {
    catalog: &'c NameCatalog,
    rng: R,
    reference_date: NaiveDate,
}

impl<'c, R: Rng> EmployeeGenerator<'c, R> {
    pub fn new(catalog: &'c NameCatalog, rng: R, reference_date: NaiveDate) -> Self {
        Self {
            catalog,
            rng,
            reference_date,
        }
    }

    /// Generator whose ages are relative to today.
    pub fn today(catalog: &'c NameCatalog, rng: R) -> Self {
        Self::new(catalog, rng, Local::now().date_naive())
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// One random employee. Missing letter or gender are drawn uniformly.
    pub fn employee(&mut self, letter: Option<char>, gender: Option<Gender>) -> Employee {
        let letter = match letter.filter(|l| letter_index(*l).is_some()) {
            Some(l) => l.to_ascii_uppercase(),
            None => LETTERS[self.rng.random_range(0..LETTERS.len())],
        };
        let gender = gender.unwrap_or_else(|| Gender::ALL[self.rng.random_range(0..2)]);

        let catalog = self.catalog;
        let surname = self.pick(catalog.surnames_for(letter));
        let given_name = self.pick(catalog.given_names());
        let patronymic = self.pick(catalog.patronymics());
        let age = self.rng.random_range(MIN_AGE..=MAX_AGE);
        let date_of_birth = self.birth_date(self.reference_date.year() - age);

        Employee::new(surname, given_name, patronymic, date_of_birth, gender.as_str())
    }

    /// Record `index` (1-based) of the subset that matches `target`.
    ///
    /// Surnames come from a namespace the general pools never produce, so
    /// these rows cannot collide with general ones.
    pub fn special(&mut self, index: u64, target: &QueryPredicate) -> Employee {
        let catalog = self.catalog;
        let surname = format!("{}_special_{}", target.surname_prefix, index);
        let given_name = self.pick(catalog.given_names());
        let patronymic = self.pick(catalog.patronymics());
        let year = self.reference_date.year();
        let birth_year = self.rng.random_range(year - MAX_SPECIAL_AGE..=year - MIN_AGE);
        let date_of_birth = self.birth_date(birth_year);

        Employee::new(surname, given_name, patronymic, date_of_birth, target.gender.as_str())
    }

    /// Lazily yield the records of `plan`.
    pub fn into_bulk(self, plan: BulkPlan) -> BulkRecords<'c, R> {
        BulkRecords {
            generator: self,
            plan,
            position: 0,
        }
    }

    fn pick(&mut self, pool: &[String]) -> String {
        pool.choose(&mut self.rng).cloned().unwrap_or_default()
    }

    fn birth_date(&mut self, year: i32) -> NaiveDate {
        let month = self.rng.random_range(1..=12);
        let day = self.rng.random_range(1..=MAX_DAY);
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or(self.reference_date)
    }
}

/// Gender of general record `index`: even is male, odd is female.
pub fn gender_for_index(index: u64) -> Gender {
    if index % 2 == 0 {
        Gender::Male
    } else {
        Gender::Female
    }
}

/// Surname letter of general record `index`, cycling A-Z.
pub fn letter_for_index(index: u64) -> char {
    LETTERS[(index % LETTERS.len() as u64) as usize]
}

/// Iterator over a [`BulkPlan`]: general records first, then the special
/// subset.
pub struct BulkRecords<'c, R> {
    generator: EmployeeGenerator<'c, R>,
    plan: BulkPlan,
    position: u64,
}

impl<R> BulkRecords<'_, R> {
    pub fn plan(&self) -> &BulkPlan {
        &self.plan
    }
}

impl<R: Rng> Iterator for BulkRecords<'_, R> {
    type Item = Employee;

    fn next(&mut self) -> Option<Employee> {
        let i = self.position;
        if i >= self.plan.records_len() {
            return None;
        }
        self.position += 1;

        if i < self.plan.total {
            Some(
                self.generator
                    .employee(Some(letter_for_index(i)), Some(gender_for_index(i))),
            )
        } else {
            let special_index = i - self.plan.total + 1;
            Some(self.generator.special(special_index, &self.plan.target))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.plan.records_len() - self.position) as usize;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for BulkRecords<'_, R> {}
