//! Core domain logic for keeper: contacts, notes and their snapshots.
//! This crate is the single source of truth for business invariants; the
//! interactive CLI only parses input and renders results.

pub mod book;
pub mod logging;
pub mod model;
pub mod store;

pub use book::address_book::{AddressBook, BookError, BookResult, UpcomingBirthday};
pub use book::notebook::{Notebook, NotebookError, NotebookResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{ContactError, ContactResult, Record};
pub use model::field::{
    enforce_birthday_policy, validate_address, validate_birthday, validate_email, validate_phone,
    Address, BirthdayPolicy, Email, FieldError, FieldResult, Phone, BIRTHDAY_FORMAT,
};
pub use model::note::{normalize_tags, Note, NoteId};
pub use store::{
    load_address_book, load_notebook, save_address_book, save_notebook, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
