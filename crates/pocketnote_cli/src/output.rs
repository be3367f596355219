//! Output formatting utilities

use pocketnote_core::{Folder, Note};

/// Folder selection meaning "notes without a folder".
pub const UNFILED_SELECTION: &str = "unfiled";

/// Format notes as one line each: id, last update, category, title, folder.
pub fn format_note_list(notes: &[Note], folders: &[Folder]) -> String {
    if notes.is_empty() {
        return "No notes found".to_string();
    }

    let mut output = String::new();
    for note in notes {
        let category = note.category.map_or("-", |category| category.as_str());
        let folder = note
            .folder_id
            .as_deref()
            .and_then(|id| folders.iter().find(|folder| folder.id == id))
            .map_or(UNFILED_SELECTION, |folder| folder.name.as_str());
        output.push_str(&format!(
            "{}  {}  {:<8}  {}  ({})\n",
            note.id,
            note.updated_at.format("%Y-%m-%d %H:%M"),
            category,
            note.title(),
            folder
        ));
    }
    output
}

/// Format folders as one line each: id, colour, count, name.
pub fn format_folder_list(folders: &[Folder]) -> String {
    if folders.is_empty() {
        return "No folders found".to_string();
    }

    let mut output = String::new();
    for folder in folders {
        output.push_str(&format!(
            "{}  {:<6}  {:>3}  {}\n",
            folder.id,
            folder.color.name(),
            folder.note_count,
            folder.name
        ));
    }
    output
}
