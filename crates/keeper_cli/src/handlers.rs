//! Contact command handlers.
//!
//! # Responsibility
//! - Implement one function per contact command: parsed argument tokens
//!   in, human-readable status string out.
//! - Convert core errors into one renderable error type.
//!
//! # Invariants
//! - Handlers never print or read the terminal; the loop owns all I/O.
//! - Multi-word values (names in show/delete commands, addresses) join
//!   the remaining tokens with single spaces.

use chrono::NaiveDate;
use keeper_core::{
    enforce_birthday_policy, validate_birthday, validate_phone, AddressBook, BirthdayPolicy,
    BookError, ContactError, FieldError, NotebookError, Record, BIRTHDAY_FORMAT,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CliResult<T> = Result<T, CliError>;

/// Renderable failure of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Arguments missing or malformed; carries the usage line.
    Usage(&'static str),
    Book(BookError),
    Notebook(NotebookError),
    Field(FieldError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(usage) => write!(f, "The command is bad. Usage: {usage}"),
            Self::Book(err) => write!(f, "{err}"),
            Self::Notebook(err) => write!(f, "{err}"),
            Self::Field(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Book(err) => Some(err),
            Self::Notebook(err) => Some(err),
            Self::Field(err) => Some(err),
            Self::Usage(_) => None,
        }
    }
}

impl From<BookError> for CliError {
    fn from(value: BookError) -> Self {
        Self::Book(value)
    }
}

impl From<ContactError> for CliError {
    fn from(value: ContactError) -> Self {
        Self::Book(BookError::Contact(value))
    }
}

impl From<NotebookError> for CliError {
    fn from(value: NotebookError) -> Self {
        Self::Notebook(value)
    }
}

impl From<FieldError> for CliError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// `add-contact <name> <phone>`
pub fn add_contact(args: &[String], book: &mut AddressBook) -> CliResult<String> {
    let [name, phone] = args else {
        return Err(CliError::Usage("add-contact <name> <phone>"));
    };
    // Validate before inserting so a bad phone never leaves an empty record.
    validate_phone(phone)?;
    let record = book.add_record(name.clone())?;
    record.add_phone(phone)?;
    Ok(format!("Contact {name} added."))
}

/// `change-phone <name> <old> <new>`
pub fn change_phone(args: &[String], book: &mut AddressBook) -> CliResult<String> {
    let [name, old, new] = args else {
        return Err(CliError::Usage("change-phone <name> <old-phone> <new-phone>"));
    };
    book.find_mut(name)?.edit_phone(old, new)?;
    Ok(format!("Phone for {name} changed."))
}

/// `show-phone <name>`
pub fn show_phone(args: &[String], book: &AddressBook) -> CliResult<String> {
    let name = joined_name(args, "show-phone <name>")?;
    let record = book.find(&name)?;
    if record.phones().is_empty() {
        return Ok(format!("{name} has no phones."));
    }
    Ok(format!("{name}: {}", join_phones(record)))
}

/// `show-contacts`
pub fn show_contacts(book: &AddressBook) -> CliResult<String> {
    if book.is_empty() {
        return Ok("The address book is empty.".to_string());
    }
    let lines: Vec<String> = book.iter().map(format_record).collect();
    Ok(lines.join("\n"))
}

/// `add-birthday <name> <DD.MM.YYYY>`
pub fn add_birthday(
    args: &[String],
    book: &mut AddressBook,
    today: NaiveDate,
    policy: BirthdayPolicy,
) -> CliResult<String> {
    let [name, raw] = args else {
        return Err(CliError::Usage("add-birthday <name> <DD.MM.YYYY>"));
    };
    let date = validate_birthday(raw)?;
    enforce_birthday_policy(date, today, policy)?;
    book.find_mut(name)?.set_birthday(raw)?;
    Ok(format!("Birthday for {name} saved."))
}

/// `show-birthday <name>`
pub fn show_birthday(args: &[String], book: &AddressBook) -> CliResult<String> {
    let name = joined_name(args, "show-birthday <name>")?;
    let record = book.find(&name)?;
    match record.birthday() {
        Some(date) => Ok(format!("{name} was born on {}.", date.format(BIRTHDAY_FORMAT))),
        None => Ok(format!("{name} has no birthday set.")),
    }
}

/// `next-birthdays [days]` (default window: 7)
pub fn next_birthdays(args: &[String], book: &AddressBook, today: NaiveDate) -> CliResult<String> {
    let window = match args {
        [] => 7,
        [raw] => raw
            .parse::<u32>()
            .map_err(|_| CliError::Usage("next-birthdays [days]"))?,
        _ => return Err(CliError::Usage("next-birthdays [days]")),
    };
    let upcoming = book.upcoming_birthdays(today, window);
    if upcoming.is_empty() {
        return Ok(format!("No birthdays in the next {window} days."));
    }
    let lines: Vec<String> = upcoming
        .iter()
        .map(|hit| {
            format!(
                "{}: {} (celebrate on {})",
                hit.name,
                hit.birthday.format(BIRTHDAY_FORMAT),
                hit.celebrated_on.format(BIRTHDAY_FORMAT)
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

/// `add-address <name> <address...>`
pub fn add_address(args: &[String], book: &mut AddressBook) -> CliResult<String> {
    set_address(args, book, "add-address <name> <address>", "added")
}

/// `change-address <name> <address...>`
pub fn change_address(args: &[String], book: &mut AddressBook) -> CliResult<String> {
    set_address(args, book, "change-address <name> <address>", "changed")
}

/// `show-address <name>`
pub fn show_address(args: &[String], book: &AddressBook) -> CliResult<String> {
    let name = joined_name(args, "show-address <name>")?;
    let record = book.find(&name)?;
    match record.address() {
        Some(address) => Ok(format!("{name} lives at {address}.")),
        None => Ok(format!("{name} has no address set.")),
    }
}

/// `delete-address <name>`
pub fn delete_address(args: &[String], book: &mut AddressBook) -> CliResult<String> {
    let name = joined_name(args, "delete-address <name>")?;
    if book.find_mut(&name)?.clear_address() {
        Ok(format!("Address for {name} removed."))
    } else {
        Ok(format!("{name} has no address to remove."))
    }
}

/// `add-email <name> <email>`
pub fn add_email(args: &[String], book: &mut AddressBook) -> CliResult<String> {
    set_email(args, book, "add-email <name> <email>", "added")
}

/// `change-email <name> <email>`
pub fn change_email(args: &[String], book: &mut AddressBook) -> CliResult<String> {
    set_email(args, book, "change-email <name> <email>", "changed")
}

/// `show-email <name>`
pub fn show_email(args: &[String], book: &AddressBook) -> CliResult<String> {
    let name = joined_name(args, "show-email <name>")?;
    let record = book.find(&name)?;
    match record.email() {
        Some(email) => Ok(format!("{name}: {email}")),
        None => Ok(format!("{name} has no email set.")),
    }
}

/// `delete-email <name>`
pub fn delete_email(args: &[String], book: &mut AddressBook) -> CliResult<String> {
    let name = joined_name(args, "delete-email <name>")?;
    if book.find_mut(&name)?.clear_email() {
        Ok(format!("Email for {name} removed."))
    } else {
        Ok(format!("{name} has no email to remove."))
    }
}

/// `search <query>`
pub fn search(args: &[String], book: &AddressBook) -> CliResult<String> {
    let query = joined_name(args, "search <query>")?;
    let matches = book.search(&query);
    if matches.is_empty() {
        return Ok(format!("Nothing found for `{query}`."));
    }
    let lines: Vec<String> = matches.into_iter().map(format_record).collect();
    Ok(lines.join("\n"))
}

/// `delete <name>`
pub fn delete_contact(args: &[String], book: &mut AddressBook) -> CliResult<String> {
    let name = joined_name(args, "delete <name>")?;
    book.delete_record(&name)?;
    Ok(format!("Contact {name} deleted."))
}

fn set_address(
    args: &[String],
    book: &mut AddressBook,
    usage: &'static str,
    verb: &str,
) -> CliResult<String> {
    let [name, rest @ ..] = args else {
        return Err(CliError::Usage(usage));
    };
    if rest.is_empty() {
        return Err(CliError::Usage(usage));
    }
    book.find_mut(name)?.set_address(&rest.join(" "))?;
    Ok(format!("Address for {name} {verb}."))
}

fn set_email(
    args: &[String],
    book: &mut AddressBook,
    usage: &'static str,
    verb: &str,
) -> CliResult<String> {
    let [name, email] = args else {
        return Err(CliError::Usage(usage));
    };
    book.find_mut(name)?.set_email(email)?;
    Ok(format!("Email for {name} {verb}."))
}

fn joined_name(args: &[String], usage: &'static str) -> CliResult<String> {
    if args.is_empty() {
        return Err(CliError::Usage(usage));
    }
    Ok(args.join(" "))
}

fn join_phones(record: &Record) -> String {
    record
        .phones()
        .iter()
        .map(|phone| phone.as_str().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_record(record: &Record) -> String {
    let mut parts = Vec::new();
    if !record.phones().is_empty() {
        parts.push(format!("phones: {}", join_phones(record)));
    }
    if let Some(date) = record.birthday() {
        parts.push(format!("birthday: {}", date.format(BIRTHDAY_FORMAT)));
    }
    if let Some(address) = record.address() {
        parts.push(format!("address: {address}"));
    }
    if let Some(email) = record.email() {
        parts.push(format!("email: {email}"));
    }
    if parts.is_empty() {
        format!("{}: (no details)", record.name())
    } else {
        format!("{}: {}", record.name(), parts.join("; "))
    }
}
