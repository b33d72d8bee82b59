//! Address book aggregate.
//!
//! # Responsibility
//! - Own every contact record, keyed by name.
//! - Provide lookup, substring search, deletion and the upcoming-birthday
//!   query.
//!
//! # Invariants
//! - No two records share a name (case-sensitive comparison).
//! - Insertion order is preserved so listings are deterministic.
//! - `upcoming_birthdays` output is sorted by celebrated date, then name.

use crate::model::contact::{ContactError, Record};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BookResult<T> = Result<T, BookError>;

/// Aggregate-level error for address book operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// Record-level mutation failure.
    Contact(ContactError),
    /// A record with this name already exists.
    DuplicateName(String),
    /// No record with this name.
    NotFound(String),
}

impl Display for BookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contact(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "contact `{name}` already exists"),
            Self::NotFound(name) => write!(f, "contact `{name}` not found"),
        }
    }
}

impl Error for BookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Contact(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactError> for BookError {
    fn from(value: ContactError) -> Self {
        Self::Contact(value)
    }
}

/// One upcoming-birthday hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    /// Contact name.
    pub name: String,
    /// Stored birth date (original year).
    pub birthday: NaiveDate,
    /// Date to celebrate on: this year's occurrence, shifted forward to
    /// Monday when it lands on a weekend.
    pub celebrated_on: NaiveDate,
}

/// Collection of all contact records, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    records: Vec<Record>,
}

impl AddressBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Adds an empty record for `name` and returns it for follow-up
    /// mutations.
    ///
    /// # Errors
    /// - `DuplicateName` when the name is already taken; the book is
    ///   unchanged after the failure.
    pub fn add_record(&mut self, name: impl Into<String>) -> BookResult<&mut Record> {
        let name = name.into();
        if self.records.iter().any(|record| record.name() == name) {
            return Err(BookError::DuplicateName(name));
        }
        self.records.push(Record::new(name));
        let index = self.records.len() - 1;
        Ok(&mut self.records[index])
    }

    /// Finds a record by exact name.
    pub fn find(&self, name: &str) -> BookResult<&Record> {
        self.records
            .iter()
            .find(|record| record.name() == name)
            .ok_or_else(|| BookError::NotFound(name.to_string()))
    }

    /// Finds a record by exact name for mutation.
    pub fn find_mut(&mut self, name: &str) -> BookResult<&mut Record> {
        self.records
            .iter_mut()
            .find(|record| record.name() == name)
            .ok_or_else(|| BookError::NotFound(name.to_string()))
    }

    /// Case-insensitive substring search over names, insertion order.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let needle = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|record| record.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Removes a record and returns it.
    pub fn delete_record(&mut self, name: &str) -> BookResult<Record> {
        let position = self
            .records
            .iter()
            .position(|record| record.name() == name)
            .ok_or_else(|| BookError::NotFound(name.to_string()))?;
        Ok(self.records.remove(position))
    }

    /// Birthdays falling within `[today, today + window_days)`.
    ///
    /// Each hit carries the date to celebrate on, shifted to the next
    /// Monday when the occurrence lands on Saturday or Sunday. Records
    /// without a birthday are skipped. Output is sorted by celebrated date
    /// ascending, ties broken by name.
    pub fn upcoming_birthdays(&self, today: NaiveDate, window_days: u32) -> Vec<UpcomingBirthday> {
        let mut hits = Vec::new();
        for record in &self.records {
            let Some(birthday) = record.birthday() else {
                continue;
            };
            let Ok(days) = record.days_to_birthday(today) else {
                continue;
            };
            if days >= i64::from(window_days) {
                continue;
            }
            let occurrence = today + Days::new(days as u64);
            hits.push(UpcomingBirthday {
                name: record.name().to_string(),
                birthday,
                celebrated_on: shift_off_weekend(occurrence),
            });
        }
        hits.sort_by(|a, b| {
            a.celebrated_on
                .cmp(&b.celebrated_on)
                .then_with(|| a.name.cmp(&b.name))
        });
        hits
    }
}

/// Moves Saturday and Sunday dates forward to the following Monday.
fn shift_off_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Days::new(2),
        Weekday::Sun => date + Days::new(1),
        _ => date,
    }
}
