//! JSON collection codec shared by the repositories.
//!
//! # Responsibility
//! - Decode a stored blob into a typed collection, resetting corrupt blobs.
//! - Encode and write a collection back under its key.
//!
//! # Invariants
//! - Only invalid JSON or a non-array blob counts as corrupt; it is replaced
//!   by `[]` in the store before returning.
//! - A valid array is never rewritten on read; items that fail to decode are
//!   skipped and logged.

use crate::store::{KeyValueStore, StoreError};
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Serialized form of an empty collection.
pub const EMPTY_COLLECTION: &str = "[]";

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure to confirm a read or write against the store.
///
/// Corrupt data and unknown ids are not errors; they are absorbed by the
/// repositories.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying store read/write failed.
    Store {
        key: &'static str,
        source: StoreError,
    },
    /// Collection could not be serialized.
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store { key, source } => write!(f, "store access for `{key}` failed: {source}"),
            Self::Encode { key, source } => write!(f, "failed to encode `{key}`: {source}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

/// Why a stored blob was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corruption {
    InvalidJson,
    NotArray,
}

impl Corruption {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::NotArray => "not_array",
        }
    }
}

/// Reads the collection stored under `key`.
///
/// Absent ⇒ empty. Corrupt ⇒ the stored value is reset to `[]` and an empty
/// collection is returned. Undecodable items of a valid array are dropped
/// from the result only.
pub(crate) fn read_collection<T, S>(store: &S, key: &'static str) -> RepoResult<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore,
{
    let raw = store
        .get(key)
        .map_err(|source| RepoError::Store { key, source })?;
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    match decode::<T>(key, &raw) {
        Ok(items) => Ok(items),
        Err(reason) => {
            warn!(
                "event=collection_reset module=repo status=recovered key={} reason={} blob_len={}",
                key,
                reason.as_str(),
                raw.len()
            );
            store
                .set(key, EMPTY_COLLECTION)
                .map_err(|source| RepoError::Store { key, source })?;
            Ok(Vec::new())
        }
    }
}

/// Serializes `items` and writes them under `key`.
pub(crate) fn write_collection<T, S>(store: &S, key: &'static str, items: &[T]) -> RepoResult<()>
where
    T: Serialize,
    S: KeyValueStore,
{
    let encoded =
        serde_json::to_string(items).map_err(|source| RepoError::Encode { key, source })?;
    store
        .set(key, &encoded)
        .map_err(|source| RepoError::Store { key, source })
}

/// Logs a failed operation at the repository boundary and passes the result
/// through.
pub(crate) fn log_failure<T>(event: &str, result: RepoResult<T>) -> RepoResult<T> {
    if let Err(err) = &result {
        error!("event={event} module=repo status=error error={err}");
    }
    result
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<Vec<T>, Corruption> {
    let value: Value = serde_json::from_str(raw).map_err(|_| Corruption::InvalidJson)?;
    let Value::Array(items) = value else {
        return Err(Corruption::NotArray);
    };

    let mut decoded = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value(item) {
            Ok(item) => decoded.push(item),
            // Category only: serde messages can echo stored values.
            Err(err) => warn!(
                "event=collection_item_skipped module=repo status=recovered key={} index={} category={:?}",
                key,
                index,
                err.classify()
            ),
        }
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::{read_collection, write_collection, EMPTY_COLLECTION};
    use crate::store::{KeyValueStore, MemoryKvStore};

    #[test]
    fn absent_key_reads_as_empty_without_writing() {
        let store = MemoryKvStore::new();
        let items: Vec<u32> = read_collection(&store, "numbers").unwrap();
        assert!(items.is_empty());
        assert_eq!(store.raw("numbers"), None);
    }

    #[test]
    fn non_array_blob_is_reset() {
        for corrupt in ["\"oops\"", "{\"a\":1}", "null", "not json"] {
            let store = MemoryKvStore::with_entries([("numbers", corrupt)]);
            let items: Vec<u32> = read_collection(&store, "numbers").unwrap();
            assert!(items.is_empty(), "blob {corrupt} should decode as empty");
            assert_eq!(store.raw("numbers").as_deref(), Some(EMPTY_COLLECTION));
        }
    }

    #[test]
    fn undecodable_items_are_skipped_without_rewriting() {
        let store = MemoryKvStore::with_entries([("numbers", "[1, \"x\", 3, {}]")]);
        let items: Vec<u32> = read_collection(&store, "numbers").unwrap();
        assert_eq!(items, vec![1, 3]);
        assert_eq!(store.raw("numbers").as_deref(), Some("[1, \"x\", 3, {}]"));
    }

    #[test]
    fn written_collection_reads_back() {
        let store = MemoryKvStore::new();
        write_collection(&store, "numbers", &[3_u32, 1, 2]).unwrap();
        assert_eq!(store.get("numbers").unwrap().as_deref(), Some("[3,1,2]"));

        let items: Vec<u32> = read_collection(&store, "numbers").unwrap();
        assert_eq!(items, vec![3, 1, 2]);
    }
}
