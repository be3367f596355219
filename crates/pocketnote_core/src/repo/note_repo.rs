//! Note repository over the `notes` blob.
//!
//! # Responsibility
//! - Own the in-memory note collection and its write-through persistence.
//! - Provide create/update/delete with silent no-op semantics for unknown
//!   ids.
//!
//! # Invariants
//! - New notes are unfiled and default to the `personal` category.
//! - `update` replaces text and refreshes `updated_at`, keeping folder and
//!   category.
//! - Folder assignment is crate-private; only the organizer moves notes.

use crate::model::note::{FolderId, Note, NoteCategory};
use crate::repo::collection::{log_failure, read_collection, write_collection, RepoResult};
use crate::store::{KeyValueStore, NOTES_KEY};
use log::{info, warn};

/// Repository owning the note collection.
pub struct NoteRepository<S: KeyValueStore> {
    store: S,
    notes: Vec<Note>,
}

impl<S: KeyValueStore> NoteRepository<S> {
    /// Creates a repository; the collection stays empty until `load`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            notes: Vec::new(),
        }
    }

    /// Current in-memory collection in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, note_id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == note_id)
    }

    /// Reloads the collection from the store.
    ///
    /// Never fails: corrupt blobs are reset to empty, and a store failure
    /// leaves the previous in-memory collection in place.
    pub fn load(&mut self) -> &[Note] {
        match log_failure("notes_load", self.fetch()) {
            Ok(notes) => {
                info!("event=notes_load module=repo status=ok count={}", notes.len());
                self.notes = notes;
            }
            Err(_) => {
                warn!(
                    "event=notes_load module=repo status=fallback count={}",
                    self.notes.len()
                );
            }
        }
        &self.notes
    }

    /// Puts back a collection captured before a failed multi-step read.
    pub(crate) fn restore(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Re-reads the collection, propagating store failures.
    pub(crate) fn refresh(&mut self) -> RepoResult<&[Note]> {
        self.notes = log_failure("notes_refresh", self.fetch())?;
        Ok(&self.notes)
    }

    /// Creates a `personal` note from `text`.
    pub fn create(&mut self, text: impl Into<String>) -> RepoResult<Note> {
        self.create_in_category(text, NoteCategory::default())
    }

    /// Creates an unfiled note in `category`.
    pub fn create_in_category(
        &mut self,
        text: impl Into<String>,
        category: NoteCategory,
    ) -> RepoResult<Note> {
        let note = Note::new(text, category);
        let result = self.fetch().and_then(|mut notes| {
            notes.push(note.clone());
            self.commit(notes)
        });
        log_failure("note_create", result)?;

        info!(
            "event=note_create module=repo status=ok note_id={} category={}",
            note.id, category
        );
        Ok(note)
    }

    /// Replaces the text of `note_id`.
    ///
    /// Returns `Ok(None)` without writing when the id is unknown.
    pub fn update(&mut self, note_id: &str, text: impl Into<String>) -> RepoResult<Option<Note>> {
        let text = text.into();
        self.modify("note_update", note_id, move |note| {
            note.text = text;
            note.touch();
        })
    }

    /// Reassigns the category of `note_id`. Unknown id is a no-op.
    pub fn set_category(
        &mut self,
        note_id: &str,
        category: NoteCategory,
    ) -> RepoResult<Option<Note>> {
        self.modify("note_set_category", note_id, move |note| {
            note.category = Some(category);
            note.touch();
        })
    }

    /// Removes `note_id`. Deleting an unknown id is a no-op.
    pub fn delete(&mut self, note_id: &str) -> RepoResult<()> {
        let result = self.fetch().and_then(|mut notes| {
            let before = notes.len();
            notes.retain(|note| note.id != note_id);
            if notes.len() == before {
                self.notes = notes;
                return Ok(false);
            }
            self.commit(notes).map(|()| true)
        });

        if log_failure("note_delete", result)? {
            info!("event=note_delete module=repo status=ok note_id={note_id}");
        } else {
            info!("event=note_delete module=repo status=noop reason=not_found note_id={note_id}");
        }
        Ok(())
    }

    /// Sets the folder of `note_id` without touching `updated_at`.
    ///
    /// Returns whether the note exists.
    pub(crate) fn assign_folder(
        &mut self,
        note_id: &str,
        folder_id: Option<FolderId>,
    ) -> RepoResult<bool> {
        let result = self.fetch().and_then(|mut notes| {
            let Some(note) = notes.iter_mut().find(|note| note.id == note_id) else {
                self.notes = notes;
                return Ok(false);
            };
            note.folder_id = folder_id;
            self.commit(notes).map(|()| true)
        });
        log_failure("note_assign_folder", result)
    }

    /// Unfiles every note whose folder id matches `should_unfile`.
    ///
    /// Writes only when at least one note changed; returns the number of
    /// notes unfiled.
    pub(crate) fn unfile_where(
        &mut self,
        event: &str,
        mut should_unfile: impl FnMut(&str) -> bool,
    ) -> RepoResult<usize> {
        let result = self.fetch().and_then(|mut notes| {
            let mut changed = 0;
            for note in &mut notes {
                if note.folder_id.as_deref().is_some_and(&mut should_unfile) {
                    note.folder_id = None;
                    changed += 1;
                }
            }
            if changed == 0 {
                self.notes = notes;
                return Ok(0);
            }
            self.commit(notes).map(|()| changed)
        });
        log_failure(event, result)
    }

    fn modify(
        &mut self,
        event: &str,
        note_id: &str,
        apply: impl FnOnce(&mut Note),
    ) -> RepoResult<Option<Note>> {
        let result = self.fetch().and_then(|mut notes| {
            let Some(note) = notes.iter_mut().find(|note| note.id == note_id) else {
                self.notes = notes;
                return Ok(None);
            };
            apply(note);
            let updated = note.clone();
            self.commit(notes).map(|()| Some(updated))
        });

        let updated = log_failure(event, result)?;
        match &updated {
            Some(_) => info!("event={event} module=repo status=ok note_id={note_id}"),
            None => warn!("event={event} module=repo status=noop reason=not_found note_id={note_id}"),
        }
        Ok(updated)
    }

    fn fetch(&self) -> RepoResult<Vec<Note>> {
        read_collection(&self.store, NOTES_KEY)
    }

    fn commit(&mut self, notes: Vec<Note>) -> RepoResult<()> {
        write_collection(&self.store, NOTES_KEY, &notes)?;
        self.notes = notes;
        Ok(())
    }
}
