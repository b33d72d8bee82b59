//! Note model and tag normalization.
//!
//! # Responsibility
//! - Hold one tagged text memo behind a stable numeric id.
//! - Define the tag normalization and search predicate shared by the
//!   notebook and the snapshot loader.
//!
//! # Invariants
//! - `id` is immutable once assigned.
//! - `text` is never empty.
//! - Tags are trimmed, non-empty, stored without a leading `#`, unique and
//!   sorted; matching is case-sensitive on tags.

use std::collections::BTreeSet;

/// Monotonic notebook-assigned note identifier.
pub type NoteId = u64;

/// One tagged text memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    text: String,
    tags: Vec<String>,
}

impl Note {
    /// Builds a note from already-normalized parts. Only the notebook and
    /// the snapshot loader assign ids.
    pub(crate) fn from_parts(id: NoteId, text: String, tags: Vec<String>) -> Self {
        Self { id, text, tags }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized tags, sorted ascending.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub(crate) fn replace(&mut self, text: String, tags: Vec<String>) {
        self.text = text;
        self.tags = tags;
    }

    /// AND-of-constraints search predicate: every requested tag must be
    /// present (exact case) and a non-empty `text` query must appear in the
    /// note text ignoring case. No constraints means a match.
    pub fn matches(&self, tags: &[String], text: &str) -> bool {
        if !tags.iter().all(|tag| self.tags.iter().any(|t| t == tag)) {
            return false;
        }
        let query = text.trim();
        if query.is_empty() {
            return true;
        }
        self.text.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Normalizes raw tag input: trims, strips one leading `#` (a search-syntax
/// marker, never stored), drops empties and de-duplicates into sorted order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut unique = BTreeSet::new();
    for tag in tags {
        let trimmed = tag.trim();
        let stripped = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
        if !stripped.is_empty() {
            unique.insert(stripped.to_string());
        }
    }
    unique.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_markers_and_dedupes() {
        let raw = vec![
            " #work ".to_string(),
            "work".to_string(),
            "Urgent".to_string(),
            "#".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(normalize_tags(&raw), vec!["Urgent", "work"]);
    }

    #[test]
    fn matches_is_case_sensitive_on_tags_only() {
        let note = Note::from_parts(1, "Call Bob".to_string(), vec!["work".to_string()]);
        assert!(note.matches(&["work".to_string()], "call"));
        assert!(!note.matches(&["Work".to_string()], "call"));
        assert!(!note.matches(&["work".to_string()], "mail"));
        assert!(note.matches(&[], ""));
    }
}
