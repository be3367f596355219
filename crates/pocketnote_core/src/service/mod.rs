//! Use-case services above the repositories.
//!
//! # Responsibility
//! - Coordinate cross-entity operations between notes and folders.
//! - Model the folder-menu drag interaction that feeds note moves.

pub mod folder_menu;
pub mod organizer;
