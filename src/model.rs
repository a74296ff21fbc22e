//! Employee record model
//!
//! `Employee` is a plain value: it knows its identity key and how old it is,
//! but nothing about persistence. Parsing helpers for the CLI live here too.

use crate::error::{Error, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format accepted on input and used for display.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(format!("Invalid gender: {}. Use 'Male' or 'Female'.", s)),
        }
    }
}

/// Uniqueness key of a stored employee.
///
/// Field order is the display order: surname, given name, patronymic, then
/// date of birth. Gender is deliberately absent, so two records that differ
/// only in gender collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct IdentityKey {
    pub surname: String,
    pub given_name: String,
    pub patronymic: String,
    pub date_of_birth: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub surname: String,
    pub given_name: String,
    pub patronymic: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
}

impl Employee {
    pub fn new(
        surname: impl Into<String>,
        given_name: impl Into<String>,
        patronymic: impl Into<String>,
        date_of_birth: NaiveDate,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            surname: surname.into(),
            given_name: given_name.into(),
            patronymic: patronymic.into(),
            date_of_birth,
            gender: gender.into(),
        }
    }

    pub fn from_full_name(name: FullName, date_of_birth: NaiveDate, gender: impl Into<String>) -> Self {
        Self::new(name.surname, name.given_name, name.patronymic, date_of_birth, gender)
    }

    /// Age in whole years on `reference`.
    pub fn age_on(&self, reference: NaiveDate) -> i32 {
        let born = self.date_of_birth;
        let mut years = reference.year() - born.year();
        if (reference.month(), reference.day()) < (born.month(), born.day()) {
            years -= 1;
        }
        years
    }

    /// Age in whole years as of today.
    pub fn age(&self) -> i32 {
        self.age_on(Local::now().date_naive())
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            surname: self.surname.clone(),
            given_name: self.given_name.clone(),
            patronymic: self.patronymic.clone(),
            date_of_birth: self.date_of_birth,
        }
    }

    /// Check that the record can be stored. Patronymic may be empty.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.surname.trim().is_empty() {
            return Err("surname cannot be empty".to_string());
        }
        if self.given_name.trim().is_empty() {
            return Err("given name cannot be empty".to_string());
        }
        if self.gender.trim().is_empty() {
            return Err("gender cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn full_name(&self) -> String {
        if self.patronymic.is_empty() {
            format!("{} {}", self.surname, self.given_name)
        } else {
            format!("{} {} {}", self.surname, self.given_name, self.patronymic)
        }
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.full_name(),
            self.date_of_birth.format(DATE_FORMAT),
            self.gender
        )
    }
}

/// Name split into its three stored parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName {
    pub surname: String,
    pub given_name: String,
    pub patronymic: String,
}

/// Split a full name on whitespace.
///
/// Two tokens leave the patronymic empty; anything past the given name is
/// joined back with single spaces into the patronymic.
pub fn parse_full_name(input: &str) -> Result<FullName> {
    let mut parts = input.split_whitespace();
    let (surname, given_name) = match (parts.next(), parts.next()) {
        (Some(surname), Some(given_name)) => (surname, given_name),
        _ => return Err(Error::InvalidFullName(input.to_string())),
    };
    let patronymic = parts.collect::<Vec<_>>().join(" ");

    Ok(FullName {
        surname: surname.to_string(),
        given_name: given_name.to_string(),
        patronymic,
    })
}

pub fn parse_birth_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|e| Error::InvalidDate {
        value: input.to_string(),
        reason: e.to_string(),
    })
}
