//! Note search, filter and sort.
//!
//! # Responsibility
//! - Provide the list-screen projections over a note collection.
//!
//! # Invariants
//! - Search matches plain text only; markup never matches.
//! - An empty query, `FolderScope::All` and `CategoryScope::All` are
//!   pass-throughs.
//! - Sorting is stable.

use super::collate::compare_labels;
use crate::model::note::{FolderId, Note, NoteCategory};
use serde::{Deserialize, Serialize};

/// Selection value the presentation layer uses for the "All Notes"
/// pseudo-folder and the unrestricted category.
pub const ALL_SELECTION: &str = "all";

/// Folder dimension of a note filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FolderScope {
    /// "All Notes": no folder restriction.
    #[default]
    All,
    /// Notes without a folder.
    Unfiled,
    /// Notes whose folder id equals this one.
    Folder(FolderId),
}

impl FolderScope {
    /// Maps a presentation selection (`"all"` or a folder id).
    pub fn from_selection(value: &str) -> Self {
        if value == ALL_SELECTION {
            Self::All
        } else {
            Self::Folder(value.to_string())
        }
    }

    /// Selection to keep after `deleted_folder_id` was removed: a scope
    /// pointing at it falls back to "All Notes".
    pub fn after_folder_deleted(self, deleted_folder_id: &str) -> Self {
        match self {
            Self::Folder(id) if id == deleted_folder_id => Self::All,
            other => other,
        }
    }

    fn admits(&self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Unfiled => note.is_unfiled(),
            Self::Folder(id) => note.is_in(id),
        }
    }
}

/// Category dimension of a note filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryScope {
    #[default]
    All,
    Only(NoteCategory),
}

impl CategoryScope {
    /// Maps `"all"` or a category name; unknown names yield `None`.
    pub fn from_selection(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case(ALL_SELECTION) {
            return Some(Self::All);
        }
        NoteCategory::parse(value).map(Self::Only)
    }

    fn admits(self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => note.category == Some(category),
        }
    }
}

/// Note list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteSortKey {
    /// Most recently updated first.
    #[default]
    Newest,
    /// Least recently updated first.
    Oldest,
    /// By derived title.
    Title,
}

impl NoteSortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Title => "title",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "title" => Some(Self::Title),
            _ => None,
        }
    }
}

/// Case-insensitive substring search over stripped note text.
pub fn search_notes(notes: &[Note], query: &str) -> Vec<Note> {
    if query.is_empty() {
        return notes.to_vec();
    }
    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| note.plain_text().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Keeps notes admitted by both scopes.
pub fn filter_notes(notes: &[Note], folder: &FolderScope, category: CategoryScope) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| folder.admits(note) && category.admits(note))
        .cloned()
        .collect()
}

/// Returns `notes` ordered by `key`.
pub fn sort_notes(notes: &[Note], key: NoteSortKey) -> Vec<Note> {
    let mut sorted = notes.to_vec();
    match key {
        NoteSortKey::Newest => sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        NoteSortKey::Oldest => sorted.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
        NoteSortKey::Title => sorted.sort_by_cached_key(|note| {
            let title = note.title();
            (title.to_lowercase(), title)
        }),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::{CategoryScope, FolderScope, NoteSortKey};
    use crate::model::note::NoteCategory;

    #[test]
    fn folder_scope_maps_all_selection() {
        assert_eq!(FolderScope::from_selection("all"), FolderScope::All);
        assert_eq!(
            FolderScope::from_selection("f-1"),
            FolderScope::Folder("f-1".to_string())
        );
    }

    #[test]
    fn deleted_selection_falls_back_to_all_notes() {
        let scope = FolderScope::Folder("gone".to_string());
        assert_eq!(scope.after_folder_deleted("gone"), FolderScope::All);

        let other = FolderScope::Folder("kept".to_string());
        assert_eq!(
            other.clone().after_folder_deleted("gone"),
            FolderScope::Folder("kept".to_string())
        );
    }

    #[test]
    fn category_scope_parses_selection() {
        assert_eq!(CategoryScope::from_selection("ALL"), Some(CategoryScope::All));
        assert_eq!(
            CategoryScope::from_selection("work"),
            Some(CategoryScope::Only(NoteCategory::Work))
        );
        assert_eq!(CategoryScope::from_selection("misc"), None);
    }

    #[test]
    fn sort_key_parse() {
        assert_eq!(NoteSortKey::parse(" Title"), Some(NoteSortKey::Title));
        assert_eq!(NoteSortKey::parse("alpha"), None);
    }
}
