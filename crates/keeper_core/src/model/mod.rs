//! Domain models for contacts and notes.
//!
//! # Responsibility
//! - Define the validated value types and the two record shapes the
//!   aggregates are built from.
//!
//! # Invariants
//! - A malformed field value cannot exist past its validator.
//! - Models carry no I/O; persistence lives in `store`.

pub mod contact;
pub mod field;
pub mod note;
