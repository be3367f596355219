//! Domain model for notes and the folders that organize them.
//!
//! # Responsibility
//! - Define the persisted JSON shapes of notes and folders.
//! - Keep derived projections (title, preview) as pure functions.
//!
//! # Invariants
//! - A note's `folder_id` is `None` or the id of an existing folder.
//! - Title and preview are never stored.

pub mod folder;
pub mod markup;
pub mod note;
