//! Repositories owning the note and folder collections.
//!
//! # Responsibility
//! - Load, mutate and write back whole collections through a
//!   `KeyValueStore`.
//! - Absorb corrupt blobs and unknown ids instead of surfacing them.
//!
//! # Invariants
//! - Every mutation is load-modify-store; the in-memory collection is
//!   replaced only after the store confirmed the write.
//! - Repositories never touch each other's collection; cross-entity work
//!   belongs to `service::organizer`.

pub mod collection;
pub mod folder_repo;
pub mod note_repo;
