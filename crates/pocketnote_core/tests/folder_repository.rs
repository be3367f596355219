mod common;

use common::{folder_json, note_json, seeded_store, FlakyStore};
use pocketnote_core::{
    sort_folders, Folder, FolderColor, FolderRepository, FolderSortKey, KeyValueStore,
    MemoryKvStore, FOLDERS_KEY, NOTES_KEY,
};

fn names(folders: &[Folder]) -> Vec<&str> {
    folders.iter().map(|folder| folder.name.as_str()).collect()
}

#[test]
fn create_trims_name_and_uses_defaults() {
    let store = MemoryKvStore::new();
    let mut repo = FolderRepository::new(&store);

    let folder = repo.create("  Work  ").unwrap().unwrap();
    assert_eq!(folder.name, "Work");
    assert_eq!(folder.color, FolderColor::Blue);
    assert_eq!(folder.note_count, 0);

    let mut reader = FolderRepository::new(&store);
    assert_eq!(reader.load(), &[folder]);
}

#[test]
fn blank_name_creates_nothing() {
    let store = MemoryKvStore::new();
    let mut repo = FolderRepository::new(&store);

    assert_eq!(repo.create("   ").unwrap(), None);
    assert!(repo.folders().is_empty());
    assert_eq!(store.get(FOLDERS_KEY).unwrap(), None);
}

#[test]
fn rename_and_recolor_refresh_last_modified() {
    let store = seeded_store(
        vec![],
        vec![folder_json("f1", "Old", 2, "2024-01-01T00:00:00Z")],
    );
    let mut repo = FolderRepository::new(&store);
    let original = repo.load()[0].clone();

    let renamed = repo.rename("f1", "New").unwrap().unwrap();
    assert_eq!(renamed.name, "New");
    assert_eq!(renamed.note_count, 2);
    assert!(renamed.last_modified > original.last_modified);

    let recolored = repo.recolor("f1", FolderColor::Green).unwrap().unwrap();
    assert_eq!(recolored.color, FolderColor::Green);
    assert_eq!(recolored.name, "New");
    assert!(recolored.last_modified >= renamed.last_modified);
}

#[test]
fn unknown_ids_are_silent_noops() {
    let store = MemoryKvStore::new();
    let mut repo = FolderRepository::new(&store);
    let folder = repo.create("Keep").unwrap().unwrap();

    assert_eq!(repo.rename("missing", "x").unwrap(), None);
    assert_eq!(repo.recolor("missing", FolderColor::Pink).unwrap(), None);
    repo.delete("missing").unwrap();
    assert_eq!(repo.folders(), &[folder]);
}

#[test]
fn delete_removes_record_and_leaves_notes_alone() {
    let store = seeded_store(
        vec![note_json("n1", "member", Some("f1"), "2024-01-01T00:00:00Z")],
        vec![folder_json("f1", "Doomed", 1, "2024-01-01T00:00:00Z")],
    );
    let notes_before = store.raw(NOTES_KEY);
    let mut repo = FolderRepository::new(&store);
    repo.load();

    repo.delete("f1").unwrap();
    assert!(repo.folders().is_empty());
    assert_eq!(store.raw(FOLDERS_KEY).as_deref(), Some("[]"));
    assert_eq!(store.raw(NOTES_KEY), notes_before);
}

#[test]
fn sort_by_name_orders_alphabetically() {
    let store = seeded_store(
        vec![],
        vec![
            folder_json("b", "B", 0, "2024-01-02T00:00:00Z"),
            folder_json("a", "A", 0, "2024-01-01T00:00:00Z"),
        ],
    );
    let mut repo = FolderRepository::new(&store);
    let folders = repo.load().to_vec();

    assert_eq!(names(&sort_folders(&folders, FolderSortKey::Name)), vec!["A", "B"]);
    assert_eq!(names(&sort_folders(&folders, FolderSortKey::Date)), vec!["B", "A"]);
    assert_eq!(names(&folders), vec!["B", "A"]);
}

#[test]
fn sort_preference_drives_sorted_view() {
    let store = seeded_store(
        vec![],
        vec![
            folder_json("z", "zeta", 0, "2024-05-01T00:00:00Z"),
            folder_json("a", "alpha", 0, "2024-01-01T00:00:00Z"),
        ],
    );
    let mut repo = FolderRepository::new(&store);
    repo.load();

    assert_eq!(repo.sort_key(), FolderSortKey::Name);
    assert_eq!(names(&repo.sorted()), vec!["alpha", "zeta"]);

    assert_eq!(repo.toggle_sort_key(), FolderSortKey::Date);
    assert_eq!(names(&repo.sorted()), vec!["zeta", "alpha"]);
}

#[test]
fn corrupt_blob_resets_to_empty_array() {
    let store = MemoryKvStore::with_entries([(FOLDERS_KEY, "\"just a string\"")]);
    let mut repo = FolderRepository::new(&store);

    assert!(repo.load().is_empty());
    assert_eq!(store.raw(FOLDERS_KEY).as_deref(), Some("[]"));
}

#[test]
fn failed_write_keeps_previous_folders() {
    let store = FlakyStore::new();
    let mut repo = FolderRepository::new(&store);
    let folder = repo.create("Stable").unwrap().unwrap();

    store.fail_writes.set(true);
    assert!(repo.create("Extra").is_err());
    assert!(repo.rename(&folder.id, "Renamed").is_err());
    assert!(repo.delete(&folder.id).is_err());
    assert_eq!(repo.folders(), &[folder]);
}
