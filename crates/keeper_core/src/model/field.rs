//! Contact field validators.
//!
//! # Responsibility
//! - Turn raw user input into typed phone/birthday/email/address values.
//! - Keep malformed values unrepresentable once constructed.
//!
//! # Invariants
//! - Validators are pure: no I/O, no clock access.
//! - `Phone`, `Email` and `Address` can only be built through validation.
//! - Birthdays are stored as dates, never as strings, so date arithmetic
//!   stays exact.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Textual birthday format accepted on input and written on save.
pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub type FieldResult<T> = Result<T, FieldError>;

/// Validation error for a single contact field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Not exactly 10 decimal digits.
    InvalidPhone(String),
    /// Not `DD.MM.YYYY`, or an impossible calendar date.
    InvalidBirthday(String),
    /// Input does not look like `local@domain.tld`.
    InvalidEmail(String),
    /// Address is empty after trimming.
    EmptyAddress,
    /// Birthday lies after "today" and the active policy forbids that.
    FutureBirthday(NaiveDate),
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPhone(value) => {
                write!(f, "invalid phone `{value}`: expected exactly 10 digits")
            }
            Self::InvalidBirthday(value) => {
                write!(f, "invalid birthday `{value}`: expected DD.MM.YYYY")
            }
            Self::InvalidEmail(value) => {
                write!(f, "invalid email `{value}`: expected local@domain.tld")
            }
            Self::EmptyAddress => write!(f, "address cannot be empty"),
            Self::FutureBirthday(date) => {
                write!(f, "birthday {} lies in the future", date.format(BIRTHDAY_FORMAT))
            }
        }
    }
}

impl Error for FieldError {}

/// A contact phone number: exactly 10 decimal digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Phone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A contact email address with a `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A free-form postal address, non-empty and stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates a phone number candidate.
///
/// Accepts exactly 10 ASCII digits after trimming surrounding whitespace.
pub fn validate_phone(input: &str) -> FieldResult<Phone> {
    let trimmed = input.trim();
    if PHONE_RE.is_match(trimmed) {
        Ok(Phone(trimmed.to_string()))
    } else {
        Err(FieldError::InvalidPhone(input.to_string()))
    }
}

/// Parses a `DD.MM.YYYY` birthday into a calendar date.
///
/// Impossible dates (`31.02.2000`, `29.02.2023`) are rejected by the
/// calendar parse itself.
pub fn validate_birthday(input: &str) -> FieldResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), BIRTHDAY_FORMAT)
        .map_err(|_| FieldError::InvalidBirthday(input.to_string()))
}

/// Validates an email candidate.
///
/// Shape check only: non-empty local part, one `@`, a domain containing at
/// least one dot, and no whitespace anywhere.
pub fn validate_email(input: &str) -> FieldResult<Email> {
    let trimmed = input.trim();
    if EMAIL_RE.is_match(trimmed) {
        Ok(Email(trimmed.to_string()))
    } else {
        Err(FieldError::InvalidEmail(input.to_string()))
    }
}

/// Validates a free-form address: anything non-empty after trimming.
pub fn validate_address(input: &str) -> FieldResult<Address> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(FieldError::EmptyAddress)
    } else {
        Ok(Address(trimmed.to_string()))
    }
}

/// Whether future-dated birthdays are accepted on input.
///
/// Deliberately a caller-side policy rather than a validator rule; the
/// format validator never consults the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BirthdayPolicy {
    /// Accept any valid calendar date.
    #[default]
    AllowFuture,
    /// Reject dates after `today`.
    RejectFuture,
}

/// Applies the configured future-birthday policy to an already-valid date.
pub fn enforce_birthday_policy(
    date: NaiveDate,
    today: NaiveDate,
    policy: BirthdayPolicy,
) -> FieldResult<()> {
    match policy {
        BirthdayPolicy::AllowFuture => Ok(()),
        BirthdayPolicy::RejectFuture if date > today => Err(FieldError::FutureBirthday(date)),
        BirthdayPolicy::RejectFuture => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_trims_surrounding_whitespace() {
        let phone = validate_phone(" 0671234567 ").expect("padded phone should validate");
        assert_eq!(phone.as_str(), "0671234567");
    }

    #[test]
    fn phone_rejects_wrong_length_and_non_digits() {
        assert!(validate_phone("123456789").is_err());
        assert!(validate_phone("12345678901").is_err());
        assert!(validate_phone("12345abcde").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn birthday_rejects_impossible_calendar_dates() {
        assert!(validate_birthday("31.02.2000").is_err());
        assert!(validate_birthday("29.02.2023").is_err());
        assert!(validate_birthday("29.02.2024").is_ok());
    }

    #[test]
    fn email_requires_dotted_domain_without_whitespace() {
        assert!(validate_email("bob@example.com").is_ok());
        assert!(validate_email("bob@example").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("bob smith@example.com").is_err());
    }

    #[test]
    fn future_birthday_policy_is_opt_in() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let future = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(enforce_birthday_policy(future, today, BirthdayPolicy::AllowFuture).is_ok());
        assert_eq!(
            enforce_birthday_policy(future, today, BirthdayPolicy::RejectFuture),
            Err(FieldError::FutureBirthday(future))
        );
        assert!(enforce_birthday_policy(today, today, BirthdayPolicy::RejectFuture).is_ok());
    }
}
