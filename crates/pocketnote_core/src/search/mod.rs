//! In-memory query helpers over loaded collections.
//!
//! # Responsibility
//! - Search, filter and sort note collections without touching the store.
//! - Share one label collation between note titles and folder names.
//!
//! # Invariants
//! - Every helper returns a new vector; inputs are never reordered.

pub mod collate;
pub mod note_query;
