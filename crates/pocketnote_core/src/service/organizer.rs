//! Note/folder organizer service.
//!
//! # Responsibility
//! - Own both repositories and keep cross-entity invariants.
//! - Provide the single entry point for moving notes and deleting folders.
//!
//! # Invariants
//! - After every completed operation each folder's `note_count` equals the
//!   number of notes whose `folder_id` is that folder's id.
//! - Notes never reference a folder absent from the folder collection:
//!   folder deletion unfiles members before removing the record, and moves
//!   to unknown folders are refused.
//! - Counts are recomputed from membership, never incremented.

use crate::model::folder::{Folder, FolderColor};
use crate::model::note::{Note, NoteCategory};
use crate::repo::collection::RepoResult;
use crate::repo::folder_repo::{FolderRepository, FolderSortKey};
use crate::repo::note_repo::NoteRepository;
use crate::store::KeyValueStore;
use log::{error, info, warn};
use std::collections::{HashMap, HashSet};

/// Both collections as returned to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizerSnapshot {
    pub notes: Vec<Note>,
    pub folders: Vec<Folder>,
}

/// Counts notes per folder id; unfiled notes are not counted.
pub fn count_members(notes: &[Note]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for folder_id in notes.iter().filter_map(|note| note.folder_id.as_deref()) {
        *counts.entry(folder_id).or_insert(0) += 1;
    }
    counts
}

/// Session-scoped coordinator over the note and folder repositories.
///
/// Construct once per session and pass it to the presentation layer.
pub struct Organizer<S: KeyValueStore> {
    notes: NoteRepository<S>,
    folders: FolderRepository<S>,
}

impl<S: KeyValueStore> Organizer<S> {
    /// Creates an organizer from repositories sharing one store.
    pub fn new(notes: NoteRepository<S>, folders: FolderRepository<S>) -> Self {
        Self { notes, folders }
    }

    pub fn notes(&self) -> &NoteRepository<S> {
        &self.notes
    }

    pub fn folders(&self) -> &FolderRepository<S> {
        &self.folders
    }

    /// Copies the current in-memory collections.
    pub fn snapshot(&self) -> OrganizerSnapshot {
        OrganizerSnapshot {
            notes: self.notes.notes().to_vec(),
            folders: self.folders.folders().to_vec(),
        }
    }

    /// Loads both collections and restores cross-entity invariants.
    ///
    /// Notes pointing at missing folders are unfiled and counts are
    /// recomputed. Never fails: if either collection cannot be read, both
    /// keep their previous contents and no repair runs; repair write
    /// failures are logged and the loaded state is returned as-is.
    pub fn load(&mut self) -> OrganizerSnapshot {
        let previous = self.snapshot();
        let fetched = self
            .notes
            .refresh()
            .map(<[Note]>::len)
            .and_then(|notes| self.folders.refresh().map(|folders| (notes, folders.len())));

        match fetched {
            Ok((notes, folders)) => info!(
                "event=organizer_load module=service status=ok notes={notes} folders={folders}"
            ),
            Err(err) => {
                self.restore(previous);
                warn!(
                    "event=organizer_load module=service status=fallback error_code=read_failed error={err}"
                );
                return self.snapshot();
            }
        }

        let known: HashSet<String> = self
            .folders
            .folders()
            .iter()
            .map(|folder| folder.id.clone())
            .collect();
        let repaired = self
            .notes
            .unfile_where("notes_repair_dangling", |folder_id| {
                !known.contains(folder_id)
            })
            .and_then(|unfiled| self.recount().map(|()| unfiled));

        match repaired {
            Ok(0) => {}
            Ok(unfiled) => warn!(
                "event=organizer_load module=service status=repaired unfiled_notes={unfiled}"
            ),
            Err(err) => error!(
                "event=organizer_load module=service status=error error_code=repair_failed error={err}"
            ),
        }
        self.snapshot()
    }

    /// Creates an unfiled `personal` note.
    pub fn create_note(&mut self, text: impl Into<String>) -> RepoResult<Note> {
        self.notes.create(text)
    }

    /// Creates an unfiled note in `category`.
    pub fn create_note_in_category(
        &mut self,
        text: impl Into<String>,
        category: NoteCategory,
    ) -> RepoResult<Note> {
        self.notes.create_in_category(text, category)
    }

    /// Replaces note text; unknown id yields `Ok(None)`.
    pub fn update_note(
        &mut self,
        note_id: &str,
        text: impl Into<String>,
    ) -> RepoResult<Option<Note>> {
        self.notes.update(note_id, text)
    }

    /// Reassigns note category; unknown id yields `Ok(None)`.
    pub fn set_note_category(
        &mut self,
        note_id: &str,
        category: NoteCategory,
    ) -> RepoResult<Option<Note>> {
        self.notes.set_category(note_id, category)
    }

    /// Deletes a note and recounts folder membership.
    pub fn delete_note(&mut self, note_id: &str) -> RepoResult<OrganizerSnapshot> {
        self.notes.delete(note_id)?;
        self.recount()?;
        Ok(self.snapshot())
    }

    /// Creates a folder; blank names yield `Ok(None)`.
    pub fn create_folder(&mut self, name: &str) -> RepoResult<Option<Folder>> {
        self.folders.create(name)
    }

    pub fn rename_folder(&mut self, folder_id: &str, name: &str) -> RepoResult<Option<Folder>> {
        self.folders.rename(folder_id, name)
    }

    pub fn recolor_folder(
        &mut self,
        folder_id: &str,
        color: FolderColor,
    ) -> RepoResult<Option<Folder>> {
        self.folders.recolor(folder_id, color)
    }

    pub fn set_folder_sort_key(&mut self, key: FolderSortKey) {
        self.folders.set_sort_key(key);
    }

    pub fn toggle_folder_sort_key(&mut self) -> FolderSortKey {
        self.folders.toggle_sort_key()
    }

    /// Moves `note_id` into `target_folder_id` (`None` ⇒ unfiled).
    ///
    /// Every folder count is recomputed afterwards, including when the
    /// note already sat in the target. Unknown notes and unknown target
    /// folders leave notes untouched.
    pub fn move_note(
        &mut self,
        note_id: &str,
        target_folder_id: Option<&str>,
    ) -> RepoResult<OrganizerSnapshot> {
        let target_known = match target_folder_id {
            Some(target) => self
                .folders
                .refresh()?
                .iter()
                .any(|folder| folder.id == target),
            None => true,
        };

        if !target_known {
            warn!(
                "event=note_move module=service status=noop reason=folder_not_found note_id={} folder_id={}",
                note_id,
                target_folder_id.unwrap_or_default()
            );
        } else if self
            .notes
            .assign_folder(note_id, target_folder_id.map(str::to_string))?
        {
            info!(
                "event=note_move module=service status=ok note_id={} folder_id={}",
                note_id,
                target_folder_id.unwrap_or("none")
            );
        } else {
            warn!("event=note_move module=service status=noop reason=note_not_found note_id={note_id}");
        }

        self.recount()?;
        Ok(self.snapshot())
    }

    /// Deletes a folder after unfiling its notes.
    ///
    /// Notes are written first, so a failure between the two writes leaves
    /// an empty folder rather than notes pointing at a missing one.
    pub fn delete_folder(&mut self, folder_id: &str) -> RepoResult<OrganizerSnapshot> {
        let unfiled = self
            .notes
            .unfile_where("folder_delete_unfile", |id| id == folder_id)?;
        self.folders.delete(folder_id)?;
        self.recount()?;

        info!(
            "event=folder_cascade_delete module=service status=ok folder_id={folder_id} unfiled_notes={unfiled}"
        );
        Ok(self.snapshot())
    }

    /// Recomputes counts from a fresh read of the notes blob.
    fn recount(&mut self) -> RepoResult<()> {
        let counts = count_members(self.notes.refresh()?);
        self.folders.apply_note_counts(&counts)
    }

    fn restore(&mut self, snapshot: OrganizerSnapshot) {
        self.notes.restore(snapshot.notes);
        self.folders.restore(snapshot.folders);
    }
}
