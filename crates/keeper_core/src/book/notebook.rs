//! Notebook aggregate.
//!
//! # Responsibility
//! - Own every note and the id counter that names them.
//! - Provide lookup, tag-and-text search, wholesale edit and deletion.
//!
//! # Invariants
//! - Ids are assigned monotonically from `next_id` and never reused, not
//!   even after deletion or a snapshot reload.
//! - Note text is never empty; tags are normalized on every write.
//! - Failed operations leave the notebook unmodified.

use crate::model::note::{normalize_tags, Note, NoteId};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FIRST_NOTE_ID: NoteId = 1;

pub type NotebookResult<T> = Result<T, NotebookError>;

/// Aggregate-level error for notebook operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookError {
    /// Note text is empty after trimming.
    EmptyText,
    /// No note with this id.
    NotFound(NoteId),
}

impl Display for NotebookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "note text cannot be empty"),
            Self::NotFound(id) => write!(f, "note {id} not found"),
        }
    }
}

impl Error for NotebookError {}

/// Collection of all notes plus the next-id counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notebook {
    notes: Vec<Note>,
    next_id: NoteId,
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}

impl Notebook {
    /// Creates an empty notebook; the first note gets id 1.
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            next_id: FIRST_NOTE_ID,
        }
    }

    /// Rehydrates a notebook from snapshot parts. The store validates the
    /// id invariants before calling this.
    pub(crate) fn from_parts(next_id: NoteId, notes: Vec<Note>) -> Self {
        Self { notes, next_id }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Id the next added note will receive.
    pub fn next_id(&self) -> NoteId {
        self.next_id
    }

    /// Notes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    /// Adds a note and returns it with its freshly assigned id.
    ///
    /// Tags are normalized (trimmed, `#` markers stripped, de-duplicated).
    ///
    /// # Errors
    /// - `EmptyText` when `text` is empty after trimming; the counter is
    ///   not advanced in that case.
    pub fn add_note(&mut self, text: impl Into<String>, tags: &[String]) -> NotebookResult<&Note> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(NotebookError::EmptyText);
        }
        let note = Note::from_parts(self.next_id, text, normalize_tags(tags));
        self.next_id += 1;
        self.notes.push(note);
        let index = self.notes.len() - 1;
        Ok(&self.notes[index])
    }

    /// Finds a note by id.
    pub fn find_by_id(&self, id: NoteId) -> NotebookResult<&Note> {
        self.notes
            .iter()
            .find(|note| note.id() == id)
            .ok_or(NotebookError::NotFound(id))
    }

    /// Notes matching every requested tag AND the text query, in id order.
    ///
    /// Requested tags pass through the same normalization as stored ones.
    /// No tags and an empty text query match every note.
    pub fn search(&self, tags: &[String], text: &str) -> Vec<&Note> {
        let tags = normalize_tags(tags);
        self.notes
            .iter()
            .filter(|note| note.matches(&tags, text))
            .collect()
    }

    /// Replaces a note's text and tag set wholesale.
    pub fn edit(&mut self, id: NoteId, new_text: &str, new_tags: &[String]) -> NotebookResult<()> {
        if new_text.trim().is_empty() {
            return Err(NotebookError::EmptyText);
        }
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id() == id)
            .ok_or(NotebookError::NotFound(id))?;
        note.replace(new_text.to_string(), normalize_tags(new_tags));
        Ok(())
    }

    /// Removes a note and returns it. The id counter is untouched, so the
    /// removed id is never handed out again.
    pub fn delete(&mut self, id: NoteId) -> NotebookResult<Note> {
        let position = self
            .notes
            .iter()
            .position(|note| note.id() == id)
            .ok_or(NotebookError::NotFound(id))?;
        Ok(self.notes.remove(position))
    }
}
