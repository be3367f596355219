//! Core domain logic for PocketNote.
//! This crate is the single source of truth for note/folder invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use config::{open_store, ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::folder::{Folder, FolderColor};
pub use model::markup::{derive_preview, derive_title, strip_html};
pub use model::note::{FolderId, Note, NoteCategory, NoteId};
pub use repo::collection::{RepoError, RepoResult};
pub use repo::folder_repo::{sort_folders, FolderRepository, FolderSortKey};
pub use repo::note_repo::NoteRepository;
pub use search::note_query::{
    filter_notes, search_notes, sort_notes, CategoryScope, FolderScope, NoteSortKey,
    ALL_SELECTION,
};
pub use service::folder_menu::{DragGesture, FolderMenu, FolderMenuState, DRAG_SWIPE_THRESHOLD};
pub use service::organizer::{count_members, Organizer, OrganizerSnapshot};
pub use store::{
    KeyValueStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult, FOLDERS_KEY, NOTES_KEY,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
