//! Key-value blob store contract consumed by the repositories.
//!
//! # Responsibility
//! - Define the `get`/`set` durability boundary for serialized collections.
//! - Name the logical keys used by the note and folder repositories.
//!
//! # Invariants
//! - A successful `set` is fully applied; there are no partial writes.
//! - The store is single-writer; no compare-and-swap is offered.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory_store;
pub mod sqlite_store;

pub use memory_store::MemoryKvStore;
pub use sqlite_store::SqliteKvStore;

/// Logical key holding the JSON array of notes.
pub const NOTES_KEY: &str = "notes";
/// Logical key holding the JSON array of folders.
pub const FOLDERS_KEY: &str = "folders";

pub type StoreResult<T> = Result<T, StoreError>;

/// Transport-level store failure.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite backend failure.
    Db(DbError),
    /// Backend rejected the operation for a non-database reason.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key → string blob store.
///
/// Implementations take `&self` so one store can back several repositories
/// at once; callers serialize access.
pub trait KeyValueStore {
    /// Reads the blob stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the blob stored under `key`.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}
