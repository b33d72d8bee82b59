//! The two in-memory aggregates.
//!
//! # Responsibility
//! - Own every `Record` and `Note` in the session and enforce aggregate
//!   invariants (unique names, monotonic note ids).
//!
//! # Invariants
//! - Aggregates are mutually independent: nothing is shared between the
//!   address book and the notebook.
//! - Failed operations leave the aggregate unmodified.

pub mod address_book;
pub mod notebook;
