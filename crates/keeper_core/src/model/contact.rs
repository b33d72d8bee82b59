//! Contact record model.
//!
//! # Responsibility
//! - Hold one contact's validated field set behind a mutation API.
//! - Provide birthday arithmetic for the upcoming-birthday query.
//!
//! # Invariants
//! - `name` is immutable after construction.
//! - Phones stay unique by exact digit string and keep insertion order.
//! - Every stored field value has passed its validator; a failed mutation
//!   leaves the record untouched.

use crate::model::field::{
    validate_address, validate_birthday, validate_email, validate_phone, Address, Email,
    FieldError, Phone,
};
use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ContactResult<T> = Result<T, ContactError>;

/// Error raised by record-level mutations and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// Field value failed validation.
    Field(FieldError),
    /// The exact same phone is already stored on this record.
    DuplicatePhone(String),
    /// The referenced phone is not stored on this record.
    PhoneNotFound(String),
    /// Date arithmetic requested on a record without a birthday.
    NoBirthday,
}

impl Display for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(err) => write!(f, "{err}"),
            Self::DuplicatePhone(phone) => write!(f, "phone {phone} is already stored"),
            Self::PhoneNotFound(phone) => write!(f, "phone {phone} is not stored"),
            Self::NoBirthday => write!(f, "no birthday set"),
        }
    }
}

impl Error for ContactError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for ContactError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// One contact: a name plus optional validated detail fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: String,
    phones: Vec<Phone>,
    birthday: Option<NaiveDate>,
    address: Option<Address>,
    email: Option<Email>,
}

impl Record {
    /// Creates an empty record for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phones: Vec::new(),
            birthday: None,
            address: None,
            email: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored phones in insertion order.
    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<NaiveDate> {
        self.birthday
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// Validates and appends a phone.
    ///
    /// # Errors
    /// - `Field` when the input is not exactly 10 digits.
    /// - `DuplicatePhone` when the same digit string is already stored; the
    ///   phone list is unchanged after the failure.
    pub fn add_phone(&mut self, input: &str) -> ContactResult<()> {
        let phone = validate_phone(input)?;
        if self.phones.contains(&phone) {
            return Err(ContactError::DuplicatePhone(phone.as_str().to_string()));
        }
        self.phones.push(phone);
        Ok(())
    }

    /// Replaces `old` with a validated `new` phone in place.
    ///
    /// The new value is validated before the lookup, so a bad replacement
    /// never removes the old number. Replacing a phone with itself is a
    /// no-op; replacing it with another stored number is rejected so the
    /// list stays duplicate-free.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> ContactResult<()> {
        let replacement = validate_phone(new)?;
        let old = old.trim();
        let position = self
            .phones
            .iter()
            .position(|phone| phone.as_str() == old)
            .ok_or_else(|| ContactError::PhoneNotFound(old.to_string()))?;
        if replacement.as_str() != old && self.phones.contains(&replacement) {
            return Err(ContactError::DuplicatePhone(replacement.as_str().to_string()));
        }
        self.phones[position] = replacement;
        Ok(())
    }

    /// Removes a stored phone.
    pub fn remove_phone(&mut self, input: &str) -> ContactResult<()> {
        let target = input.trim();
        let position = self
            .phones
            .iter()
            .position(|phone| phone.as_str() == target)
            .ok_or_else(|| ContactError::PhoneNotFound(target.to_string()))?;
        self.phones.remove(position);
        Ok(())
    }

    /// Validates and overwrites the birthday.
    pub fn set_birthday(&mut self, input: &str) -> ContactResult<()> {
        self.birthday = Some(validate_birthday(input)?);
        Ok(())
    }

    /// Validates and overwrites the address.
    pub fn set_address(&mut self, input: &str) -> ContactResult<()> {
        self.address = Some(validate_address(input)?);
        Ok(())
    }

    /// Validates and overwrites the email.
    pub fn set_email(&mut self, input: &str) -> ContactResult<()> {
        self.email = Some(validate_email(input)?);
        Ok(())
    }

    /// Clears the address. Returns whether a value was actually removed.
    pub fn clear_address(&mut self) -> bool {
        self.address.take().is_some()
    }

    /// Clears the email. Returns whether a value was actually removed.
    pub fn clear_email(&mut self) -> bool {
        self.email.take().is_some()
    }

    /// Days from `today` to the next occurrence of the birthday's
    /// month/day.
    ///
    /// Returns 0 when the birthday is today and wraps into the next year
    /// when this year's occurrence has already passed. A `29.02` birthday
    /// counts as `01.03` in non-leap target years.
    ///
    /// # Errors
    /// - `NoBirthday` when the record has no birthday set.
    pub fn days_to_birthday(&self, today: NaiveDate) -> ContactResult<i64> {
        let birthday = self.birthday.ok_or(ContactError::NoBirthday)?;
        let mut next = occurrence_in_year(birthday, today.year());
        if next < today {
            next = occurrence_in_year(birthday, today.year() + 1);
        }
        Ok((next - today).num_days())
    }
}

/// Projects a birthday's month/day into `year`, falling back to 1 March
/// for 29 February in non-leap years.
fn occurrence_in_year(birthday: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .expect("1 March exists in every year")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_day_birthday_falls_on_march_first_in_common_years() {
        let mut record = Record::new("Kim");
        record.set_birthday("29.02.2000").unwrap();
        assert_eq!(record.days_to_birthday(date(2023, 2, 28)).unwrap(), 1);
        assert_eq!(record.days_to_birthday(date(2024, 2, 28)).unwrap(), 1);
    }

    #[test]
    fn failed_edit_keeps_the_old_phone() {
        let mut record = Record::new("Kim");
        record.add_phone("0671234567").unwrap();
        let err = record.edit_phone("0671234567", "bad").unwrap_err();
        assert!(matches!(err, ContactError::Field(_)));
        assert_eq!(record.phones()[0].as_str(), "0671234567");
    }
}
