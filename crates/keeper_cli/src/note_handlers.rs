//! Note command handlers.
//!
//! # Responsibility
//! - Implement the `nadd`/`nfind`/`nedit`/`ndel`/`note` commands over the
//!   notebook, returning status strings for the loop to render.
//!
//! # Invariants
//! - `#` is search syntax only; it is stripped before tags reach the core.
//! - Handlers never print or read the terminal.

use crate::handlers::{CliError, CliResult};
use keeper_core::{Note, NoteId, Notebook};

/// `nadd <text...>` plus the tag line prompted by the loop.
pub fn add_note(notebook: &mut Notebook, text: &str, tags: &[String]) -> CliResult<String> {
    let note = notebook.add_note(text, tags)?;
    Ok(format!("Note {} created.", note.id()))
}

/// `note <id>`
pub fn show_note(notebook: &Notebook, id_token: &str) -> CliResult<String> {
    let id = parse_note_id(id_token)?;
    Ok(format_note(notebook.find_by_id(id)?))
}

/// `nfind [#tag...] [text...]`: splits tokens into tag constraints
/// (leading `#`) and a free-text query, then searches with AND semantics.
pub fn find_notes(notebook: &Notebook, args: &[String]) -> CliResult<String> {
    let (tags, words): (Vec<String>, Vec<String>) =
        args.iter().cloned().partition(|token| token.starts_with('#'));
    let text = words.join(" ");
    let found = notebook.search(&tags, &text);
    if found.is_empty() {
        return Ok("No notes found.".to_string());
    }
    let lines: Vec<String> = found.into_iter().map(format_note).collect();
    Ok(lines.join("\n"))
}

/// `nedit <id>` plus the replacement text and tag lines prompted by the
/// loop. Replaces both wholesale.
pub fn edit_note(
    notebook: &mut Notebook,
    id_token: &str,
    new_text: &str,
    new_tags: &[String],
) -> CliResult<String> {
    let id = parse_note_id(id_token)?;
    notebook.edit(id, new_text, new_tags)?;
    Ok(format!("Note {id} updated."))
}

/// `ndel <id>`
pub fn delete_note(notebook: &mut Notebook, id_token: &str) -> CliResult<String> {
    let id = parse_note_id(id_token)?;
    notebook.delete(id)?;
    Ok(format!("Note {id} deleted."))
}

/// Splits a comma-separated tag line into raw tag tokens; the core
/// normalizes them further.
pub fn split_tag_line(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validates that `id_token` names an existing note. The loop calls this
/// before prompting for `nedit` replacement input.
pub fn ensure_note(notebook: &Notebook, id_token: &str) -> CliResult<NoteId> {
    let id = parse_note_id(id_token)?;
    notebook.find_by_id(id)?;
    Ok(id)
}

fn parse_note_id(token: &str) -> CliResult<NoteId> {
    token
        .parse::<NoteId>()
        .map_err(|_| CliError::Usage("<id> must be a positive integer"))
}

fn format_note(note: &Note) -> String {
    if note.tags().is_empty() {
        format!("[{}] {}", note.id(), note.text())
    } else {
        let tags: Vec<String> = note.tags().iter().map(|tag| format!("#{tag}")).collect();
        format!("[{}] {} ({})", note.id(), note.text(), tags.join(" "))
    }
}
