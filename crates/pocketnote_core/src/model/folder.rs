//! Folder domain model.
//!
//! # Responsibility
//! - Define the persisted folder record and the fixed color palette.
//!
//! # Invariants
//! - `name` is non-blank after trim.
//! - `note_count` is a cache owned by the organizer; it is recomputed from
//!   note membership and never edited on its own.
//! - `last_modified` moves on rename/recolor only.

use super::note::FolderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Five-entry folder palette, stored as hex strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FolderColor {
    #[default]
    Blue,
    Orange,
    Pink,
    Purple,
    Green,
}

impl FolderColor {
    /// Palette in picker order.
    pub const PALETTE: [FolderColor; 5] = [
        Self::Blue,
        Self::Orange,
        Self::Pink,
        Self::Purple,
        Self::Green,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            Self::Blue => "#007AFF",
            Self::Orange => "#FF9500",
            Self::Pink => "#FF2D55",
            Self::Purple => "#5856D6",
            Self::Green => "#34C759",
        }
    }

    /// Matches a hex code (case-insensitive) or a palette name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::PALETTE.into_iter().find(|color| {
            color.hex().eq_ignore_ascii_case(value) || color.name().eq_ignore_ascii_case(value)
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Purple => "purple",
            Self::Green => "green",
        }
    }
}

impl From<String> for FolderColor {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

impl From<FolderColor> for String {
    fn from(value: FolderColor) -> Self {
        value.hex().to_string()
    }
}

impl Display for FolderColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hex())
    }
}

/// Persisted folder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    #[serde(default)]
    pub color: FolderColor,
    #[serde(default)]
    pub note_count: usize,
    pub last_modified: DateTime<Utc>,
}

impl Folder {
    /// Creates an empty folder in the default color.
    ///
    /// Callers must pass a non-blank, trimmed name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: FolderColor::default(),
            note_count: 0,
            last_modified: Utc::now(),
        }
    }

    pub(crate) fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::{Folder, FolderColor};

    #[test]
    fn color_round_trips_as_hex_and_tolerates_unknown_values() {
        let json = serde_json::to_string(&FolderColor::Pink).unwrap();
        assert_eq!(json, "\"#FF2D55\"");

        let parsed: FolderColor = serde_json::from_str("\"#ff9500\"").unwrap();
        assert_eq!(parsed, FolderColor::Orange);

        let unknown: FolderColor = serde_json::from_str("\"#123456\"").unwrap();
        assert_eq!(unknown, FolderColor::Blue);
    }

    #[test]
    fn new_folder_starts_empty_in_default_color() {
        let folder = Folder::new("Work");
        assert_eq!(folder.note_count, 0);
        assert_eq!(folder.color, FolderColor::Blue);

        let value = serde_json::to_value(&folder).unwrap();
        assert_eq!(value.get("noteCount").unwrap(), 0);
        assert_eq!(value.get("color").unwrap(), "#007AFF");
        assert!(value.get("lastModified").is_some());
    }

    #[test]
    fn missing_color_and_count_use_defaults() {
        let raw = r#"{"id":"f1","name":"Inbox","lastModified":"2024-05-01T10:00:00Z"}"#;
        let folder: Folder = serde_json::from_str(raw).unwrap();
        assert_eq!(folder.color, FolderColor::Blue);
        assert_eq!(folder.note_count, 0);
    }
}
