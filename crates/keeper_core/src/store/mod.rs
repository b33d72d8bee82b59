//! JSON snapshot persistence for both aggregates.
//!
//! # Responsibility
//! - Serialize the address book and the notebook to durable JSON
//!   documents and rehydrate them at startup.
//! - Keep the write path atomic: a crash mid-save never leaves a
//!   half-written snapshot behind.
//!
//! # Invariants
//! - Saves write to a `.tmp` sibling and rename over the target.
//! - Loads re-run every field validator and aggregate invariant; a
//!   snapshot that the mutation API would have rejected fails with
//!   `Corrupt` instead of being accepted silently.
//! - A missing snapshot file is `Missing`, reported distinctly from a
//!   corrupt one, so callers can treat it as "start empty".

use crate::book::address_book::AddressBook;
use crate::book::notebook::Notebook;
use crate::model::field::BIRTHDAY_FORMAT;
use crate::model::note::{normalize_tags, Note, NoteId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer error.
#[derive(Debug)]
pub enum StoreError {
    /// No snapshot exists at this path yet.
    Missing(PathBuf),
    /// Disk I/O failed.
    Io(io::Error),
    /// The snapshot is present but violates the data-model invariants.
    Corrupt(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(path) => write!(f, "no snapshot at {}", path.display()),
            Self::Io(err) => write!(f, "snapshot i/o failed: {err}"),
            Self::Corrupt(message) => write!(f, "corrupt snapshot: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Wire shape of one contact record.
#[derive(Debug, Serialize, Deserialize)]
struct ContactDocument {
    name: String,
    phones: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

/// Wire shape of the whole notebook.
#[derive(Debug, Serialize, Deserialize)]
struct NotebookDocument {
    next_id: NoteId,
    notes: Vec<NoteDocument>,
}

/// Wire shape of one note.
#[derive(Debug, Serialize, Deserialize)]
struct NoteDocument {
    id: NoteId,
    text: String,
    tags: Vec<String>,
}

/// Loads an address book snapshot.
///
/// # Errors
/// - `Missing` when no file exists at `path`.
/// - `Corrupt` when the document does not parse or any record fails the
///   validators (`add_phone`, `set_birthday`, ...) it was saved through.
pub fn load_address_book(path: impl AsRef<Path>) -> StoreResult<AddressBook> {
    let bytes = read_snapshot(path.as_ref())?;
    let documents: Vec<ContactDocument> = serde_json::from_slice(&bytes)
        .map_err(|err| StoreError::Corrupt(format!("contacts document: {err}")))?;

    let mut book = AddressBook::new();
    for document in documents {
        if document.name.trim().is_empty() {
            return Err(StoreError::Corrupt("record with an empty name".to_string()));
        }
        let record = book
            .add_record(document.name.clone())
            .map_err(|err| corrupt_record(&document.name, &err))?;
        for phone in &document.phones {
            record
                .add_phone(phone)
                .map_err(|err| corrupt_record(&document.name, &err))?;
        }
        if let Some(birthday) = &document.birthday {
            record
                .set_birthday(birthday)
                .map_err(|err| corrupt_record(&document.name, &err))?;
        }
        if let Some(address) = &document.address {
            record
                .set_address(address)
                .map_err(|err| corrupt_record(&document.name, &err))?;
        }
        if let Some(email) = &document.email {
            record
                .set_email(email)
                .map_err(|err| corrupt_record(&document.name, &err))?;
        }
    }
    Ok(book)
}

/// Saves an address book snapshot atomically.
pub fn save_address_book(path: impl AsRef<Path>, book: &AddressBook) -> StoreResult<()> {
    let documents: Vec<ContactDocument> = book
        .iter()
        .map(|record| ContactDocument {
            name: record.name().to_string(),
            phones: record
                .phones()
                .iter()
                .map(|phone| phone.as_str().to_string())
                .collect(),
            birthday: record
                .birthday()
                .map(|date| date.format(BIRTHDAY_FORMAT).to_string()),
            address: record.address().map(|address| address.as_str().to_string()),
            email: record.email().map(|email| email.as_str().to_string()),
        })
        .collect();
    write_snapshot(path.as_ref(), &documents)
}

/// Loads a notebook snapshot, including the next-id counter.
///
/// # Errors
/// - `Missing` when no file exists at `path`.
/// - `Corrupt` on a parse failure, an empty note text, a duplicate id, or
///   a `next_id` that does not exceed every stored id (a reload must never
///   hand out an id that was already issued).
pub fn load_notebook(path: impl AsRef<Path>) -> StoreResult<Notebook> {
    let bytes = read_snapshot(path.as_ref())?;
    let document: NotebookDocument = serde_json::from_slice(&bytes)
        .map_err(|err| StoreError::Corrupt(format!("notebook document: {err}")))?;

    let mut seen = BTreeSet::new();
    let mut notes = Vec::with_capacity(document.notes.len());
    for note in document.notes {
        if note.text.trim().is_empty() {
            return Err(StoreError::Corrupt(format!("note {} has empty text", note.id)));
        }
        if !seen.insert(note.id) {
            return Err(StoreError::Corrupt(format!("duplicate note id {}", note.id)));
        }
        if note.id >= document.next_id {
            return Err(StoreError::Corrupt(format!(
                "note id {} is not below next_id {}",
                note.id, document.next_id
            )));
        }
        notes.push(Note::from_parts(
            note.id,
            note.text,
            normalize_tags(&note.tags),
        ));
    }
    Ok(Notebook::from_parts(document.next_id, notes))
}

/// Saves a notebook snapshot atomically, preserving the id counter.
pub fn save_notebook(path: impl AsRef<Path>, notebook: &Notebook) -> StoreResult<()> {
    let document = NotebookDocument {
        next_id: notebook.next_id(),
        notes: notebook
            .iter()
            .map(|note| NoteDocument {
                id: note.id(),
                text: note.text().to_string(),
                tags: note.tags().to_vec(),
            })
            .collect(),
    };
    write_snapshot(path.as_ref(), &document)
}

fn corrupt_record(name: &str, err: &dyn Display) -> StoreError {
    StoreError::Corrupt(format!("record `{name}`: {err}"))
}

fn read_snapshot(path: &Path) -> StoreResult<Vec<u8>> {
    fs::read(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            StoreError::Missing(path.to_path_buf())
        } else {
            StoreError::Io(err)
        }
    })
}

/// Serializes `document` and replaces the snapshot at `path` atomically:
/// write to a temporary sibling, then rename over the target.
fn write_snapshot<T: Serialize>(path: &Path, document: &T) -> StoreResult<()> {
    let bytes = serde_json::to_vec_pretty(document)
        .map_err(|err| StoreError::Corrupt(format!("serialize snapshot: {err}")))?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = temp_sibling(path);
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::temp_sibling;
    use std::path::Path;

    #[test]
    fn temp_sibling_appends_suffix_next_to_target() {
        let tmp = temp_sibling(Path::new("/data/contacts.json"));
        assert_eq!(tmp, Path::new("/data/contacts.json.tmp"));
    }
}
