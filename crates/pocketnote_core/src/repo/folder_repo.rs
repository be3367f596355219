//! Folder repository over the `folders` blob.
//!
//! # Responsibility
//! - Own the in-memory folder collection, its persistence and the folder
//!   sort preference.
//!
//! # Invariants
//! - Blank names never create a folder.
//! - `delete` removes the folder record only; member notes are unfiled by
//!   the organizer beforehand.
//! - `note_count` is written only through `apply_note_counts`.

use crate::model::folder::{Folder, FolderColor};
use crate::repo::collection::{log_failure, read_collection, write_collection, RepoResult};
use crate::search::collate::compare_labels;
use crate::store::{KeyValueStore, FOLDERS_KEY};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Folder list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderSortKey {
    /// Case-aware lexicographic by name.
    #[default]
    Name,
    /// Most recently modified first.
    Date,
}

impl FolderSortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Date => "date",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    /// The other ordering, as offered by the folder panel toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Name => Self::Date,
            Self::Date => Self::Name,
        }
    }
}

/// Returns `folders` ordered by `key`; the input is left untouched.
pub fn sort_folders(folders: &[Folder], key: FolderSortKey) -> Vec<Folder> {
    let mut sorted = folders.to_vec();
    match key {
        FolderSortKey::Name => sorted.sort_by(|a, b| compare_labels(&a.name, &b.name)),
        FolderSortKey::Date => sorted.sort_by(|a, b| b.last_modified.cmp(&a.last_modified)),
    }
    sorted
}

/// Repository owning the folder collection.
pub struct FolderRepository<S: KeyValueStore> {
    store: S,
    folders: Vec<Folder>,
    sort_key: FolderSortKey,
}

impl<S: KeyValueStore> FolderRepository<S> {
    /// Creates a repository; the collection stays empty until `load`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            folders: Vec::new(),
            sort_key: FolderSortKey::default(),
        }
    }

    /// Current in-memory collection in insertion order.
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn get(&self, folder_id: &str) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.id == folder_id)
    }

    pub fn contains(&self, folder_id: &str) -> bool {
        self.get(folder_id).is_some()
    }

    pub fn sort_key(&self) -> FolderSortKey {
        self.sort_key
    }

    pub fn set_sort_key(&mut self, key: FolderSortKey) {
        self.sort_key = key;
    }

    /// Flips between name and date ordering and returns the new key.
    pub fn toggle_sort_key(&mut self) -> FolderSortKey {
        self.sort_key = self.sort_key.toggled();
        self.sort_key
    }

    /// Collection ordered by the current sort preference.
    pub fn sorted(&self) -> Vec<Folder> {
        sort_folders(&self.folders, self.sort_key)
    }

    /// Reloads the collection from the store.
    ///
    /// Same contract as `NoteRepository::load`: corrupt blobs reset to empty
    /// and store failures keep the previous collection.
    pub fn load(&mut self) -> &[Folder] {
        match log_failure("folders_load", self.fetch()) {
            Ok(folders) => {
                info!(
                    "event=folders_load module=repo status=ok count={}",
                    folders.len()
                );
                self.folders = folders;
            }
            Err(_) => {
                warn!(
                    "event=folders_load module=repo status=fallback count={}",
                    self.folders.len()
                );
            }
        }
        &self.folders
    }

    /// Creates a folder named `name` (trimmed).
    ///
    /// A blank name is a caller precondition violation and yields
    /// `Ok(None)` without writing.
    pub fn create(&mut self, name: &str) -> RepoResult<Option<Folder>> {
        let name = name.trim();
        if name.is_empty() {
            warn!("event=folder_create module=repo status=noop reason=blank_name");
            return Ok(None);
        }

        let folder = Folder::new(name);
        let result = self.fetch().and_then(|mut folders| {
            folders.push(folder.clone());
            self.commit(folders)
        });
        log_failure("folder_create", result)?;

        info!(
            "event=folder_create module=repo status=ok folder_id={}",
            folder.id
        );
        Ok(Some(folder))
    }

    /// Renames `folder_id`. Unknown id or blank name is a no-op.
    pub fn rename(&mut self, folder_id: &str, name: &str) -> RepoResult<Option<Folder>> {
        let name = name.trim();
        if name.is_empty() {
            warn!(
                "event=folder_rename module=repo status=noop reason=blank_name folder_id={folder_id}"
            );
            return Ok(None);
        }
        let name = name.to_string();
        self.modify("folder_rename", folder_id, move |folder| {
            folder.name = name;
        })
    }

    /// Changes the palette color of `folder_id`. Unknown id is a no-op.
    pub fn recolor(&mut self, folder_id: &str, color: FolderColor) -> RepoResult<Option<Folder>> {
        self.modify("folder_recolor", folder_id, move |folder| {
            folder.color = color;
        })
    }

    /// Removes the folder record. Unknown id is a no-op.
    pub fn delete(&mut self, folder_id: &str) -> RepoResult<()> {
        let result = self.fetch().and_then(|mut folders| {
            let before = folders.len();
            folders.retain(|folder| folder.id != folder_id);
            if folders.len() == before {
                self.folders = folders;
                return Ok(false);
            }
            self.commit(folders).map(|()| true)
        });

        if log_failure("folder_delete", result)? {
            info!("event=folder_delete module=repo status=ok folder_id={folder_id}");
        } else {
            info!(
                "event=folder_delete module=repo status=noop reason=not_found folder_id={folder_id}"
            );
        }
        Ok(())
    }

    /// Sets every folder's `note_count` from `counts` (missing ⇒ 0) and
    /// persists the collection when any count moved.
    pub(crate) fn apply_note_counts(&mut self, counts: &HashMap<&str, usize>) -> RepoResult<()> {
        let result = self.fetch().and_then(|mut folders| {
            let mut changed = false;
            for folder in &mut folders {
                let count = counts.get(folder.id.as_str()).copied().unwrap_or(0);
                if folder.note_count != count {
                    folder.note_count = count;
                    changed = true;
                }
            }
            if !changed {
                self.folders = folders;
                return Ok(());
            }
            self.commit(folders)
        });
        log_failure("folder_recount", result)
    }

    /// Puts back a collection captured before a failed multi-step read.
    pub(crate) fn restore(&mut self, folders: Vec<Folder>) {
        self.folders = folders;
    }

    /// Re-reads the collection, propagating store failures.
    pub(crate) fn refresh(&mut self) -> RepoResult<&[Folder]> {
        self.folders = log_failure("folders_refresh", self.fetch())?;
        Ok(&self.folders)
    }

    fn modify(
        &mut self,
        event: &str,
        folder_id: &str,
        apply: impl FnOnce(&mut Folder),
    ) -> RepoResult<Option<Folder>> {
        let result = self.fetch().and_then(|mut folders| {
            let Some(folder) = folders.iter_mut().find(|folder| folder.id == folder_id) else {
                self.folders = folders;
                return Ok(None);
            };
            apply(folder);
            folder.touch();
            let updated = folder.clone();
            self.commit(folders).map(|()| Some(updated))
        });

        let updated = log_failure(event, result)?;
        match &updated {
            Some(_) => info!("event={event} module=repo status=ok folder_id={folder_id}"),
            None => warn!(
                "event={event} module=repo status=noop reason=not_found folder_id={folder_id}"
            ),
        }
        Ok(updated)
    }

    fn fetch(&self) -> RepoResult<Vec<Folder>> {
        read_collection(&self.store, FOLDERS_KEY)
    }

    fn commit(&mut self, folders: Vec<Folder>) -> RepoResult<()> {
        write_collection(&self.store, FOLDERS_KEY, &folders)?;
        self.folders = folders;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{sort_folders, FolderSortKey};
    use crate::model::folder::Folder;
    use chrono::{TimeZone, Utc};

    fn folder(name: &str, day: u32) -> Folder {
        let mut folder = Folder::new(name);
        folder.last_modified = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
        folder
    }

    #[test]
    fn sort_by_name_is_case_aware_and_leaves_input_alone() {
        let input = vec![folder("beta", 1), folder("Alpha", 2), folder("alpha", 3)];
        let sorted = sort_folders(&input, FolderSortKey::Name);
        let names: Vec<&str> = sorted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "alpha", "beta"]);
        assert_eq!(input[0].name, "beta");
    }

    #[test]
    fn sort_by_date_is_most_recent_first() {
        let input = vec![folder("old", 1), folder("new", 20), folder("mid", 10)];
        let sorted = sort_folders(&input, FolderSortKey::Date);
        let names: Vec<&str> = sorted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["new", "mid", "old"]);
    }

    #[test]
    fn sort_key_parses_and_toggles() {
        assert_eq!(FolderSortKey::parse("DATE"), Some(FolderSortKey::Date));
        assert_eq!(FolderSortKey::parse("size"), None);
        assert_eq!(FolderSortKey::Name.toggled(), FolderSortKey::Date);
    }
}
