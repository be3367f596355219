#![allow(dead_code)]

use pocketnote_core::{
    FolderRepository, KeyValueStore, MemoryKvStore, NoteRepository, Organizer, StoreError,
    StoreResult,
};
use serde_json::{json, Value};
use std::cell::Cell;

/// Memory store whose reads/writes can be made to fail on demand.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryKvStore,
    pub fail_reads: Cell<bool>,
    pub fail_reads_of: Cell<Option<&'static str>>,
    pub fail_writes: Cell<bool>,
    pub fail_writes_to: Cell<Option<&'static str>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrapping(inner: MemoryKvStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if self.fail_reads.get() || self.fail_reads_of.get() == Some(key) {
            return Err(StoreError::Unavailable(format!("read of {key} refused")));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.get() || self.fail_writes_to.get() == Some(key) {
            return Err(StoreError::Unavailable(format!("write of {key} refused")));
        }
        self.inner.set(key, value)
    }
}

/// Organizer over a borrowed store, already loaded.
pub fn organizer<S: KeyValueStore>(store: &S) -> Organizer<&S> {
    let mut organizer = Organizer::new(NoteRepository::new(store), FolderRepository::new(store));
    organizer.load();
    organizer
}

pub fn note_json(id: &str, text: &str, folder_id: Option<&str>, updated_at: &str) -> Value {
    json!({
        "id": id,
        "text": text,
        "category": "personal",
        "folderId": folder_id,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": updated_at,
    })
}

pub fn folder_json(id: &str, name: &str, note_count: usize, last_modified: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "color": "#007AFF",
        "noteCount": note_count,
        "lastModified": last_modified,
    })
}

pub fn seeded_store(notes: Vec<Value>, folders: Vec<Value>) -> MemoryKvStore {
    MemoryKvStore::with_entries([
        ("notes", Value::Array(notes).to_string()),
        ("folders", Value::Array(folders).to_string()),
    ])
}

/// Asserts both cross-entity invariants on the organizer's collections.
pub fn assert_consistent<S: KeyValueStore>(organizer: &Organizer<S>) {
    let notes = organizer.notes().notes();
    let folders = organizer.folders().folders();
    for folder in folders {
        let members = notes
            .iter()
            .filter(|note| note.folder_id.as_deref() == Some(folder.id.as_str()))
            .count();
        assert_eq!(folder.note_count, members, "count drift on {}", folder.id);
    }
    for note in notes {
        if let Some(folder_id) = &note.folder_id {
            assert!(
                folders.iter().any(|folder| &folder.id == folder_id),
                "note {} references missing folder {folder_id}",
                note.id
            );
        }
    }
}
